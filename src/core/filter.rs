//! Trailing position filter: moving average over the last N samples
//!
//! Suppresses detection jitter. The buffer is a fixed-capacity ring written
//! oldest-in-slot; until it has wrapped once, only the populated slots count
//! toward the average, so there is no startup glitch from unwritten slots.

use crate::types::Vec3;
use crate::TRAILING_SAMPLES;

/// Fixed-capacity trailing buffer of position samples
#[derive(Debug)]
pub struct TrailingFilter {
    samples: [Vec3; TRAILING_SAMPLES],
    /// Total samples ever received; may exceed capacity
    received: u64,
}

impl Default for TrailingFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailingFilter {
    pub fn new() -> Self {
        Self {
            samples: [Vec3::ZERO; TRAILING_SAMPLES],
            received: 0,
        }
    }

    /// Insert a sample, overwriting the oldest slot once the buffer is full
    pub fn add_sample(&mut self, sample: Vec3) {
        let index = (self.received % TRAILING_SAMPLES as u64) as usize;
        self.samples[index] = sample;
        self.received += 1;
    }

    /// Mean of the populated slots. `None` until the first sample arrives.
    pub fn filtered(&self) -> Option<Vec3> {
        if self.received == 0 {
            return None;
        }
        let count = self.len();
        let mut sum = Vec3::ZERO;
        for sample in &self.samples[..count] {
            sum.x += sample.x;
            sum.y += sample.y;
            sum.z += sample.z;
        }
        let n = count as f64;
        Some(Vec3::new(sum.x / n, sum.y / n, sum.z / n))
    }

    /// Number of populated slots, at most `TRAILING_SAMPLES`
    pub fn len(&self) -> usize {
        (self.received).min(TRAILING_SAMPLES as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.received == 0
    }

    /// Total samples ever received
    pub fn received(&self) -> u64 {
        self.received
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(v: f64) -> Vec3 {
        Vec3::new(v, 2.0 * v, 3.0 * v)
    }

    #[test]
    fn test_empty_filter_has_no_position() {
        let filter = TrailingFilter::new();
        assert!(filter.filtered().is_none());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_single_sample_is_its_own_mean() {
        let mut filter = TrailingFilter::new();
        filter.add_sample(Vec3::new(0.1, 0.2, 0.7));
        assert_eq!(filter.filtered(), Some(Vec3::new(0.1, 0.2, 0.7)));
    }

    #[test]
    fn test_partial_fill_averages_only_populated_slots() {
        let mut filter = TrailingFilter::new();
        filter.add_sample(Vec3::new(1.0, 0.0, 0.0));
        filter.add_sample(Vec3::new(3.0, 0.0, 0.0));
        let mean = filter.filtered().unwrap();
        assert!((mean.x - 2.0).abs() < 1e-12);
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_full_window_mean() {
        let mut filter = TrailingFilter::new();
        for i in 0..TRAILING_SAMPLES {
            filter.add_sample(sample(i as f64));
        }
        // Mean of 0..9 is 4.5
        let mean = filter.filtered().unwrap();
        assert!((mean.x - 4.5).abs() < 1e-12);
        assert!((mean.y - 9.0).abs() < 1e-12);
        assert!((mean.z - 13.5).abs() < 1e-12);
    }

    #[test]
    fn test_wraparound_keeps_only_most_recent_window() {
        let mut filter = TrailingFilter::new();
        for i in 0..(TRAILING_SAMPLES + 3) {
            filter.add_sample(sample(i as f64));
        }
        // Window now holds 3..12, mean 7.5
        let mean = filter.filtered().unwrap();
        assert!((mean.x - 7.5).abs() < 1e-12);
        assert_eq!(filter.len(), TRAILING_SAMPLES);
        assert_eq!(filter.received(), (TRAILING_SAMPLES + 3) as u64);
    }

    #[test]
    fn test_long_run_window_stays_bounded() {
        let mut filter = TrailingFilter::new();
        for _ in 0..1000 {
            filter.add_sample(Vec3::new(0.0, 0.0, 0.7));
        }
        filter.add_sample(Vec3::new(0.0, 0.0, 1.7));
        // One outlier in a window of 10
        let mean = filter.filtered().unwrap();
        assert!((mean.z - 0.8).abs() < 1e-12);
    }
}
