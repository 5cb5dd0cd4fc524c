//! Core types for ergowatch

mod config;
mod detection;
mod geometry;
mod output;
mod posture;

pub use config::{AlertConfig, CalibrationConfig, ConfigError, NeutralZoneConfig, Settings};
pub use detection::Detection;
pub use geometry::{Point2, Vec3};
pub use output::TickOutput;
pub use posture::{EscalationTier, Posture};
