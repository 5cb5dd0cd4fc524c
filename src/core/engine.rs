//! Posture engine: detection in, alert decision out
//!
//! Owns the triangulation calibration, the trailing filter, and the alert
//! scheduler as one exclusively-owned unit, updated atomically once per tick.

use std::time::Instant;

use chrono::Utc;

use crate::core::filter::TrailingFilter;
use crate::core::scheduler::AlertScheduler;
use crate::core::triangulate::triangulate;
use crate::types::{
    AlertConfig, CalibrationConfig, ConfigError, Detection, NeutralZoneConfig, Posture,
    TickOutput, Vec3,
};

/// The complete monitoring pipeline behind a single per-tick entry point
#[derive(Debug)]
pub struct PostureEngine {
    calibration: CalibrationConfig,
    filter: TrailingFilter,
    scheduler: AlertScheduler,
    /// Degenerate detections discarded so far
    rejected_samples: u64,
    tick_count: u64,
}

impl PostureEngine {
    /// Construct the engine. Configs are validated here; the engine cannot
    /// exist in an invalid configuration.
    pub fn new(
        calibration: CalibrationConfig,
        zone: NeutralZoneConfig,
        alert: AlertConfig,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        calibration.validate()?;
        zone.validate()?;
        alert.validate()?;
        Ok(Self {
            calibration,
            filter: TrailingFilter::new(),
            scheduler: AlertScheduler::new(zone, alert, now),
            rejected_samples: 0,
            tick_count: 0,
        })
    }

    /// Process one tick: ingest the detection, update the smoothed position,
    /// evaluate the alert schedule.
    ///
    /// Deterministic given identical construction state and identical
    /// `(detection, now)` sequences.
    pub fn on_tick(&mut self, detection: &Detection, now: Instant) -> TickOutput {
        self.tick_count += 1;

        let mut sample_rejected = false;
        if let Detection::FaceAndEyes { eye1, eye2 } = detection {
            match triangulate(*eye1, *eye2, &self.calibration) {
                Ok(sample) => self.filter.add_sample(sample),
                Err(_) => {
                    // Skip the sample for this tick; the previous filtered
                    // position still drives the scheduler
                    sample_rejected = true;
                    self.rejected_samples += 1;
                }
            }
        }

        let position = self.filter.filtered();
        let decision = self.scheduler.evaluate(position, now);

        TickOutput {
            timestamp: Utc::now(),
            posture: decision.posture,
            countdown_s: decision.countdown_s,
            position,
            alert_pulse: decision.pulse,
            tier: decision.tier,
            sample_rejected,
        }
    }

    /// Current smoothed position, `None` until the first valid sample
    pub fn filtered_position(&self) -> Option<Vec3> {
        self.filter.filtered()
    }

    /// Current posture verdict
    pub fn posture(&self) -> Posture {
        self.scheduler.current_posture()
    }

    /// Configured alert delay in seconds
    pub fn alert_delay(&self) -> f64 {
        self.scheduler.alert_delay()
    }

    /// Seconds since the position was last inside the neutral zone
    pub fn time_since_last_good(&self, now: Instant) -> f64 {
        self.scheduler.time_since_last_good(now)
    }

    /// Ticks processed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Degenerate detections discarded
    pub fn rejected_samples(&self) -> u64 {
        self.rejected_samples
    }
}

// =============================================================================
// TESTS
// =============================================================================
