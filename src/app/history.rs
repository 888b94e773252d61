//! Fixed-capacity FIFO of percentage samples

use std::collections::VecDeque;

/// Rolling time series of CPU or RAM readings.
///
/// Values are stored verbatim; clamping to [0, 100] is left to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl RollingHistory {
    /// Creates an empty history holding at most `capacity` samples.
    ///
    /// # Panics
    /// If `capacity` is zero. Configuration rejects zero before this point.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a sample, evicting the single oldest one once over capacity.
    pub fn append(&mut self, value: f32) {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        assert!(self.samples.len() <= self.capacity);
    }

    /// Samples in chronological order, oldest first.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = f32> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    /// Copies the samples out in chronological order.
    #[cfg(test)]
    pub fn to_vec(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }

    /// Most recent sample, if any.
    pub fn last(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_history() {
        let history = RollingHistory::new(3);
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
        assert_eq!(history.to_vec(), Vec::<f32>::new());
    }

    #[test]
    fn test_append_below_capacity_keeps_order() {
        let mut history = RollingHistory::new(3);
        history.append(1.0);
        history.append(2.0);
        assert_eq!(history.to_vec(), vec![1.0, 2.0]);
        assert_eq!(history.last(), Some(2.0));
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = RollingHistory::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            history.append(v);
        }
        assert_eq!(history.to_vec(), vec![3.0, 4.0, 5.0]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_out_of_range_values_are_kept_verbatim() {
        let mut history = RollingHistory::new(2);
        history.append(-5.0);
        history.append(250.0);
        assert_eq!(history.to_vec(), vec![-5.0, 250.0]);
    }

    #[test]
    #[should_panic(expected = "history capacity must be at least 1")]
    fn test_zero_capacity_panics() {
        let _ = RollingHistory::new(0);
    }

    proptest! {
        #[test]
        fn prop_bounded_and_keeps_newest_in_order(
            capacity in 1usize..50,
            values in proptest::collection::vec(-10.0f32..110.0, 0..200),
        ) {
            let mut history = RollingHistory::new(capacity);
            for &v in &values {
                history.append(v);
                prop_assert!(history.len() <= capacity);
            }

            let keep = values.len().min(capacity);
            let expected = values[values.len() - keep..].to_vec();
            prop_assert_eq!(history.to_vec(), expected);
        }
    }
}
