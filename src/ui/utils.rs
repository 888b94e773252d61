//! Utility functions for UI rendering

use crossterm::style::Color;

use crate::constants::{
    BYTES_PER_MB, USAGE_THRESHOLD_CRITICAL, USAGE_THRESHOLD_MODERATE, USAGE_THRESHOLD_WARNING,
};

/// Sparkline glyphs from lowest to highest
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Truncates a string to fit within a given width.
///
/// If the string exceeds `max_len` characters, it is cut and "..." is
/// appended. Counts characters, not bytes.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Pads or cuts `s` to exactly `width` characters.
#[must_use]
pub fn fit(s: &str, width: usize) -> String {
    let cut = truncate_string(s, width);
    let pad = width.saturating_sub(cut.chars().count());
    format!("{}{:pad$}", cut, "", pad = pad)
}

/// Returns a color for a usage percentage.
///
/// # Color Thresholds
/// * Red - Critical usage (≥80%)
/// * Yellow - Warning level (≥50%)
/// * Cyan - Moderate usage (≥20%)
/// * Green - Low usage (<20%)
#[must_use]
pub fn usage_color(percent: f32) -> Color {
    if percent >= USAGE_THRESHOLD_CRITICAL {
        Color::Red
    } else if percent >= USAGE_THRESHOLD_WARNING {
        Color::Yellow
    } else if percent >= USAGE_THRESHOLD_MODERATE {
        Color::Cyan
    } else {
        Color::Green
    }
}

/// Clamps a stored sample into the drawable [0, 100] range.
#[must_use]
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Renders the newest `width` samples as a one-line sparkline.
///
/// Shorter histories are right-aligned so the newest sample is always in
/// the last column.
#[must_use]
pub fn sparkline<I>(samples: I, width: usize) -> String
where
    I: DoubleEndedIterator<Item = f32> + ExactSizeIterator,
{
    let skip = samples.len().saturating_sub(width);
    let bars: String = samples
        .skip(skip)
        .map(|v| {
            let level = (clamp_percent(v) / 100.0 * (SPARK_LEVELS.len() - 1) as f32).round();
            SPARK_LEVELS[level as usize]
        })
        .collect();
    let pad = width.saturating_sub(bars.chars().count());
    format!("{:pad$}{}", "", bars, pad = pad)
}

/// Bytes as megabytes with two decimals, e.g. "12.50 MB".
#[must_use]
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("notepad", 10), "notepad");
        assert_eq!(truncate_string("svchost-netsvcs", 10), "svchost...");
        assert_eq!(truncate_string("abcdef", 2), "ab");
        assert_eq!(truncate_string("ééééé", 4), "é...");
    }

    #[test]
    fn test_fit_pads_to_width() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdefgh", 6), "abc...");
    }

    #[test]
    fn test_sparkline_clamps_out_of_range() {
        let samples = vec![-20.0f32, 0.0, 50.0, 100.0, 250.0];
        assert_eq!(sparkline(samples.into_iter(), 5), "▁▁▅██");
    }

    #[test]
    fn test_sparkline_keeps_newest_and_right_aligns() {
        let samples = vec![100.0f32, 0.0, 0.0];
        assert_eq!(sparkline(samples.clone().into_iter(), 2), "▁▁");
        assert_eq!(sparkline(samples.into_iter(), 5), "  █▁▁");
    }

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(1_048_576), "1.00 MB");
        assert_eq!(format_mb(13_107_200), "12.50 MB");
    }

    #[test]
    fn test_usage_color() {
        assert_eq!(usage_color(95.0), Color::Red);
        assert_eq!(usage_color(60.0), Color::Yellow);
        assert_eq!(usage_color(25.0), Color::Cyan);
        assert_eq!(usage_color(5.0), Color::Green);
    }
}
