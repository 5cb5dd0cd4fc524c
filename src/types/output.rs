//! Per-tick output record for terminal display and telemetry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EscalationTier, Posture, Vec3};

/// Everything the engine decided on one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickOutput {
    /// Wall-clock timestamp (display only; scheduling uses the monotonic clock)
    pub timestamp: DateTime<Utc>,
    /// Current posture verdict
    pub posture: Posture,
    /// Seconds until the alert threshold is crossed; negative once overdue
    pub countdown_s: f64,
    /// Smoothed position, `None` until the first sample has arrived
    pub position: Option<Vec3>,
    /// Whether an audible pulse fired this tick
    pub alert_pulse: bool,
    /// Escalation tier while overdue
    pub tier: Option<EscalationTier>,
    /// A degenerate eye pair was discarded this tick
    pub sample_rejected: bool,
}

impl TickOutput {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.posture.color_code();
        let reset = Posture::color_reset();

        let position = match self.position {
            Some(p) => p.to_string(),
            None => "(no position yet)".to_string(),
        };

        let mut line = format!(
            "{}posture={} | pos={} | countdown={:.1}s{}",
            color, self.posture, position, self.countdown_s, reset
        );
        if let Some(tier) = self.tier {
            line.push_str(&format!(" {}[{}]{}", color, tier, reset));
        }
        if self.alert_pulse {
            line.push_str(" *BEEP*");
        }
        line
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let position = match self.position {
            Some(p) => p.to_string(),
            None => "unavailable".to_string(),
        };
        format!(
            "posture={} | pos={} | countdown={:.1}s | pulse={}",
            self.posture, position, self.countdown_s, self.alert_pulse
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output() -> TickOutput {
        TickOutput {
            timestamp: Utc::now(),
            posture: Posture::Good,
            countdown_s: 8.2,
            position: Some(Vec3::new(0.01, -0.02, 0.74)),
            alert_pulse: false,
            tier: None,
            sample_rejected: false,
        }
    }

    #[test]
    fn test_parseable_format() {
        let out = sample_output();
        let s = out.to_parseable_string();
        assert!(s.contains("posture=GOOD"));
        assert!(s.contains("countdown=8.2s"));
        assert!(s.contains("pulse=false"));
    }

    #[test]
    fn test_parseable_format_no_position() {
        let mut out = sample_output();
        out.position = None;
        assert!(out.to_parseable_string().contains("pos=unavailable"));
    }

    #[test]
    fn test_terminal_format_marks_pulse() {
        let mut out = sample_output();
        out.posture = Posture::Poor;
        out.countdown_s = -31.0;
        out.tier = Some(EscalationTier::Insistent);
        out.alert_pulse = true;
        let s = out.to_terminal_string();
        assert!(s.contains("POOR"));
        assert!(s.contains("INSISTENT"));
        assert!(s.contains("*BEEP*"));
    }

    #[test]
    fn test_json_round_trip() {
        let out = sample_output();
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"posture\""));
        assert!(json.contains("\"countdown_s\""));
        let _: TickOutput = serde_json::from_str(&json).unwrap();
    }
}
