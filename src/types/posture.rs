//! Posture verdict and alert escalation tiers

use serde::{Deserialize, Serialize};

use crate::{
    BEEP_PERIOD_GENTLE_SECS, BEEP_PERIOD_INSISTENT_SECS, BEEP_PERIOD_URGENT_SECS,
    TIER_INSISTENT_AFTER_SECS, TIER_URGENT_AFTER_SECS,
};

/// Posture verdict against the neutral zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Posture {
    /// Filtered position inside the neutral zone
    Good,
    /// Filtered position outside the neutral zone
    Poor,
}

impl Posture {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Posture::Good => "\x1b[32m", // Green
            Posture::Poor => "\x1b[31m", // Red
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for Posture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Posture::Good => "GOOD",
            Posture::Poor => "POOR",
        };
        write!(f, "{}", name)
    }
}

/// How long posture has been overdue, banded into beep-cadence tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscalationTier {
    /// Overdue up to 30 s: beep every 10 s
    Gentle,
    /// Overdue 30-60 s: beep every 5 s
    Insistent,
    /// Overdue past 60 s: beep every second
    Urgent,
}

impl EscalationTier {
    /// Classify an overdue duration (seconds past the alert delay)
    pub fn for_overdue(overdue_s: f64) -> Self {
        if overdue_s > TIER_URGENT_AFTER_SECS {
            EscalationTier::Urgent
        } else if overdue_s > TIER_INSISTENT_AFTER_SECS {
            EscalationTier::Insistent
        } else {
            EscalationTier::Gentle
        }
    }

    /// Minimum spacing between beeps in this tier, seconds
    pub fn beep_period(&self) -> f64 {
        match self {
            EscalationTier::Gentle => BEEP_PERIOD_GENTLE_SECS,
            EscalationTier::Insistent => BEEP_PERIOD_INSISTENT_SECS,
            EscalationTier::Urgent => BEEP_PERIOD_URGENT_SECS,
        }
    }
}

impl std::fmt::Display for EscalationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EscalationTier::Gentle => "GENTLE",
            EscalationTier::Insistent => "INSISTENT",
            EscalationTier::Urgent => "URGENT",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
