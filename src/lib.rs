//! Ergowatch: webcam ergonomics monitor
//!
//! Watches the user's head position relative to the camera and beeps, with
//! escalating urgency, once the position has been outside the configured
//! neutral zone for too long.
//!
//! Pipeline per tick: detection → triangulate → trailing filter → alert scheduler

pub mod core;
pub mod types;

// =============================================================================
// TRAILING FILTER
// =============================================================================

/// Number of position samples in the trailing-average window
pub const TRAILING_SAMPLES: usize = 10;

// =============================================================================
// ALERT TIMING
// =============================================================================

/// Half-width of the countdown zero-crossing window (seconds).
/// Ticks landing inside it fire the initial beep.
pub const PULSE_EDGE_WINDOW_SECS: f64 = 0.05;

/// Overdue duration after which the insistent tier starts (seconds)
pub const TIER_INSISTENT_AFTER_SECS: f64 = 30.0;

/// Overdue duration after which the urgent tier starts (seconds)
pub const TIER_URGENT_AFTER_SECS: f64 = 60.0;

/// Beep period while overdue 0-30 s: every 10 seconds
pub const BEEP_PERIOD_GENTLE_SECS: f64 = 10.0;

/// Beep period while overdue 30-60 s: every 5 seconds
pub const BEEP_PERIOD_INSISTENT_SECS: f64 = 5.0;

/// Beep period while overdue 60+ s: every second
pub const BEEP_PERIOD_URGENT_SECS: f64 = 1.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
