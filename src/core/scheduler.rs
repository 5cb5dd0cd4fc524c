//! Posture alert scheduler
//!
//! Compares the smoothed position against the neutral zone, tracks how long
//! posture has been bad, and decides when to beep. Alert cadence escalates
//! through three tiers the longer posture stays overdue, so brief lapses get
//! a gentle reminder while sustained bad posture demands attention.
//!
//! All timing is comparison of monotonic instants passed in by the caller;
//! the scheduler never reads a clock itself.

use std::time::Instant;

use crate::types::{AlertConfig, EscalationTier, NeutralZoneConfig, Posture, Vec3};
use crate::PULSE_EDGE_WINDOW_SECS;

/// Outcome of one scheduler evaluation
#[derive(Debug, Clone, Copy)]
pub struct AlertDecision {
    pub posture: Posture,
    /// Seconds until the alert threshold; negative once overdue
    pub countdown_s: f64,
    /// Whether to beep this tick
    pub pulse: bool,
    /// Escalation tier while overdue
    pub tier: Option<EscalationTier>,
}

/// Timer-driven alert state machine over `{Good, Poor}`
#[derive(Debug)]
pub struct AlertScheduler {
    zone: NeutralZoneConfig,
    alert: AlertConfig,
    posture: Posture,
    /// Last instant the position was inside the neutral zone. Seeded with the
    /// construction instant so startup gets a grace period instead of an
    /// immediate alert.
    last_ok: Instant,
    last_alert: Instant,
}

impl AlertScheduler {
    pub fn new(zone: NeutralZoneConfig, alert: AlertConfig, now: Instant) -> Self {
        Self {
            zone,
            alert,
            posture: Posture::Good,
            last_ok: now,
            last_alert: now,
        }
    }

    /// Evaluate one tick.
    ///
    /// `position` is the current smoothed position, or `None` while the
    /// filter has not produced one yet (detection loss is handled upstream by
    /// simply passing the previous smoothed value).
    pub fn evaluate(&mut self, position: Option<Vec3>, now: Instant) -> AlertDecision {
        if let Some(pos) = position {
            let distance = pos.distance(&self.zone.center);
            if distance <= self.zone.radius_m {
                self.posture = Posture::Good;
                self.last_ok = now;
            } else {
                // Distance alone flips the label; alerting below is timer-driven
                self.posture = Posture::Poor;
            }
        }

        let since_ok = now.duration_since(self.last_ok).as_secs_f64();
        let countdown_s = self.alert.alert_delay_s - since_ok;

        let (pulse, tier) = self.decide_pulse(countdown_s, now);
        if pulse {
            self.last_alert = now;
        }

        AlertDecision {
            posture: self.posture,
            countdown_s,
            pulse,
            tier,
        }
    }

    /// Pulse decision for a given countdown. Values inside the edge window
    /// fire the initial beep; past it, the beep period is set by how overdue
    /// posture is.
    fn decide_pulse(&self, countdown_s: f64, now: Instant) -> (bool, Option<EscalationTier>) {
        if countdown_s.abs() < PULSE_EDGE_WINDOW_SECS {
            let tier = if countdown_s < 0.0 {
                Some(EscalationTier::for_overdue(-countdown_s))
            } else {
                None
            };
            return (true, tier);
        }

        if countdown_s < 0.0 {
            let tier = EscalationTier::for_overdue(-countdown_s);
            let since_alert = now.duration_since(self.last_alert).as_secs_f64();
            // Strictly greater: a gap of exactly one period does not re-beep
            return (since_alert > tier.beep_period(), Some(tier));
        }

        (false, None)
    }

    /// Configured alert delay in seconds
    pub fn alert_delay(&self) -> f64 {
        self.alert.alert_delay_s
    }

    /// Seconds since the position was last inside the neutral zone
    pub fn time_since_last_good(&self, now: Instant) -> f64 {
        now.duration_since(self.last_ok).as_secs_f64()
    }

    /// Current posture verdict
    pub fn current_posture(&self) -> Posture {
        self.posture
    }
}

// =============================================================================
// TESTS
// =============================================================================
