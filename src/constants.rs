//! Centralized constants for the application
//!
//! This module contains all magic numbers and configuration defaults
//! used throughout the application, making them easy to find and modify.

// ============================================================================
// Application Info
// ============================================================================

/// Application name displayed in header
pub const DISPLAY_NAME: &str = "System Monitor";

// ============================================================================
// Sampling (milliseconds)
// ============================================================================

/// Default sampling interval in milliseconds
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1000;

/// Minimum allowed sampling interval
pub const MIN_SAMPLE_INTERVAL_MS: u64 = 100;

/// Maximum allowed sampling interval
pub const MAX_SAMPLE_INTERVAL_MS: u64 = 60_000;

/// Default render tick in milliseconds
pub const DEFAULT_FRAME_MS: u64 = 50;

/// Minimum allowed render tick
pub const MIN_FRAME_MS: u64 = 10;

/// Maximum allowed render tick
pub const MAX_FRAME_MS: u64 = 1000;

// ============================================================================
// Rolling History
// ============================================================================

/// Default number of CPU/RAM samples kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Upper bound on history capacity
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

// ============================================================================
// Navigation
// ============================================================================

/// Lines taken by header, tab bar, search bar, column headers and footer
pub const VISIBLE_ROWS_OVERHEAD: usize = 7;

// ============================================================================
// Byte Size Conversions
// ============================================================================

/// Bytes in a megabyte
pub const BYTES_PER_MB: f64 = 1_048_576.0;

// ============================================================================
// Usage Thresholds (for coloring)
// ============================================================================

/// Usage threshold for red color (critical)
pub const USAGE_THRESHOLD_CRITICAL: f32 = 80.0;

/// Usage threshold for yellow color (warning)
pub const USAGE_THRESHOLD_WARNING: f32 = 50.0;

/// Usage threshold for cyan color (moderate)
pub const USAGE_THRESHOLD_MODERATE: f32 = 20.0;

// ============================================================================
// Logging
// ============================================================================

/// Log file written when none is configured
pub const DEFAULT_LOG_FILE: &str = "sysmon-overlay.log";

/// Log filter used when neither RUST_LOG nor --log-level is set
pub const DEFAULT_LOG_LEVEL: &str = "info";
