//! Startup configuration: calibration, neutral zone, alert timing
//!
//! Loaded once from a JSON settings file and validated fatally before the
//! engine is constructed. None of these values change at runtime.

use std::fs;

use serde::Deserialize;

use crate::types::Vec3;

/// Camera/triangulation calibration constants.
///
/// `downscale_factor` is not read by the triangulator itself: the capture
/// collaborator shrinks frames by it before detection and scales detected
/// coordinates back to full-frame pixels. It ships in the same settings file,
/// so it is validated here with everything else.
#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationConfig {
    /// Interpupillary distance in meters
    pub interpupillary_distance_m: f64,
    /// Focal length in pixels
    pub focal_length_px: f64,
    /// Full frame width in pixels
    pub frame_width_px: f64,
    /// Full frame height in pixels
    pub frame_height_px: f64,
    /// Factor frames are shrunk by before detection
    pub downscale_factor: f64,
}

impl CalibrationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.interpupillary_distance_m > 0.0) {
            return Err(ConfigError::IpdNotPositive(self.interpupillary_distance_m));
        }
        if !(self.focal_length_px > 0.0) {
            return Err(ConfigError::FocalLengthNotPositive(self.focal_length_px));
        }
        if !(self.frame_width_px > 0.0) {
            return Err(ConfigError::FrameWidthNotPositive(self.frame_width_px));
        }
        if !(self.frame_height_px > 0.0) {
            return Err(ConfigError::FrameHeightNotPositive(self.frame_height_px));
        }
        if !(self.downscale_factor >= 1.0) {
            return Err(ConfigError::DownscaleBelowOne(self.downscale_factor));
        }
        Ok(())
    }
}

/// The sphere of acceptable head positions
#[derive(Debug, Clone, Deserialize)]
pub struct NeutralZoneConfig {
    /// Center of the neutral zone, camera-relative meters
    pub center: Vec3,
    /// Radius of the neutral zone, meters
    pub radius_m: f64,
}

impl NeutralZoneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.center.is_finite() {
            return Err(ConfigError::NeutralCenterNotFinite);
        }
        if !(self.radius_m >= 0.0) {
            return Err(ConfigError::RadiusNegative(self.radius_m));
        }
        Ok(())
    }
}

/// Alert timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Seconds of continuous bad posture tolerated before alerting starts
    pub alert_delay_s: f64,
}

impl AlertConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alert_delay_s >= 0.0) {
            return Err(ConfigError::AlertDelayNegative(self.alert_delay_s));
        }
        Ok(())
    }
}

/// On-disk settings file.
///
/// Field names match the original `config/settings.json` layout:
///
/// ```json
/// {
///   "alert_time": 10.0,
///   "neutral_position": [0.0, 0.0, 0.7],
///   "neutral_radius": 0.1,
///   "ipd": 0.063,
///   "downscale_factor": 2.0,
///   "frame_width": 1280,
///   "frame_height": 720,
///   "camera_calibration": { "f": 500.0 }
/// }
/// ```
///
/// Unknown fields (e.g. `camera_id`, consumed by the capture collaborator)
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub alert_time: f64,
    pub neutral_position: [f64; 3],
    pub neutral_radius: f64,
    pub ipd: f64,
    pub downscale_factor: f64,
    pub frame_width: f64,
    pub frame_height: f64,
    pub camera_calibration: CameraCalibration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraCalibration {
    /// Focal length in pixels
    pub f: f64,
}

impl Settings {
    /// Load and validate a settings file. Any failure is fatal to startup.
    pub fn load(path: &str) -> Result<Settings, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_string(), e.to_string()))?;
        let settings: Settings = serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calibration().validate()?;
        self.neutral_zone().validate()?;
        self.alert().validate()?;
        Ok(())
    }

    pub fn calibration(&self) -> CalibrationConfig {
        CalibrationConfig {
            interpupillary_distance_m: self.ipd,
            focal_length_px: self.camera_calibration.f,
            frame_width_px: self.frame_width,
            frame_height_px: self.frame_height,
            downscale_factor: self.downscale_factor,
        }
    }

    pub fn neutral_zone(&self) -> NeutralZoneConfig {
        NeutralZoneConfig {
            center: Vec3::new(
                self.neutral_position[0],
                self.neutral_position[1],
                self.neutral_position[2],
            ),
            radius_m: self.neutral_radius,
        }
    }

    pub fn alert(&self) -> AlertConfig {
        AlertConfig {
            alert_delay_s: self.alert_time,
        }
    }
}

/// Fatal configuration errors. There are no safe defaults for any of these.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Settings file could not be read
    Io(String, String),
    /// Settings file is not valid JSON for the expected layout
    Parse(String, String),
    /// Interpupillary distance must be positive
    IpdNotPositive(f64),
    /// Focal length must be positive
    FocalLengthNotPositive(f64),
    /// Frame width must be positive
    FrameWidthNotPositive(f64),
    /// Frame height must be positive
    FrameHeightNotPositive(f64),
    /// Downscale factor must be at least 1
    DownscaleBelowOne(f64),
    /// Neutral zone center must be finite
    NeutralCenterNotFinite,
    /// Neutral zone radius must be non-negative
    RadiusNegative(f64),
    /// Alert delay must be non-negative
    AlertDelayNegative(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "cannot read settings file {}: {}", path, e),
            Self::Parse(path, e) => write!(f, "cannot parse settings file {}: {}", path, e),
            Self::IpdNotPositive(v) => {
                write!(f, "interpupillary distance must be positive, got {}", v)
            }
            Self::FocalLengthNotPositive(v) => {
                write!(f, "focal length must be positive, got {}", v)
            }
            Self::FrameWidthNotPositive(v) => {
                write!(f, "frame width must be positive, got {}", v)
            }
            Self::FrameHeightNotPositive(v) => {
                write!(f, "frame height must be positive, got {}", v)
            }
            Self::DownscaleBelowOne(v) => {
                write!(f, "downscale factor must be at least 1, got {}", v)
            }
            Self::NeutralCenterNotFinite => write!(f, "neutral zone center must be finite"),
            Self::RadiusNegative(v) => {
                write!(f, "neutral zone radius must be non-negative, got {}", v)
            }
            Self::AlertDelayNegative(v) => {
                write!(f, "alert delay must be non-negative, got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            alert_time: 10.0,
            neutral_position: [0.0, 0.0, 0.7],
            neutral_radius: 0.1,
            ipd: 0.063,
            downscale_factor: 2.0,
            frame_width: 1280.0,
            frame_height: 720.0,
            camera_calibration: CameraCalibration { f: 500.0 },
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_zero_ipd_rejected() {
        let mut s = valid_settings();
        s.ipd = 0.0;
        assert_eq!(s.validate(), Err(ConfigError::IpdNotPositive(0.0)));
    }

    #[test]
    fn test_negative_focal_length_rejected() {
        let mut s = valid_settings();
        s.camera_calibration.f = -500.0;
        assert_eq!(s.validate(), Err(ConfigError::FocalLengthNotPositive(-500.0)));
    }

    #[test]
    fn test_nan_radius_rejected() {
        let mut s = valid_settings();
        s.neutral_radius = f64::NAN;
        assert!(matches!(s.validate(), Err(ConfigError::RadiusNegative(_))));
    }

    #[test]
    fn test_zero_radius_allowed() {
        let mut s = valid_settings();
        s.neutral_radius = 0.0;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_downscale_below_one_rejected() {
        let mut s = valid_settings();
        s.downscale_factor = 0.5;
        assert_eq!(s.validate(), Err(ConfigError::DownscaleBelowOne(0.5)));
    }

    #[test]
    fn test_negative_alert_delay_rejected() {
        let mut s = valid_settings();
        s.alert_time = -1.0;
        assert_eq!(s.validate(), Err(ConfigError::AlertDelayNegative(-1.0)));
    }

    #[test]
    fn test_settings_split() {
        let s = valid_settings();
        let calib = s.calibration();
        assert_eq!(calib.interpupillary_distance_m, 0.063);
        assert_eq!(calib.focal_length_px, 500.0);
        let zone = s.neutral_zone();
        assert_eq!(zone.center, Vec3::new(0.0, 0.0, 0.7));
        assert_eq!(zone.radius_m, 0.1);
        assert_eq!(s.alert().alert_delay_s, 10.0);
    }

    #[test]
    fn test_parse_original_layout() {
        let json = r#"{
            "camera_id": 0,
            "alert_time": 10.0,
            "neutral_position": [0.0, 0.0, 0.7],
            "neutral_radius": 0.1,
            "ipd": 0.063,
            "downscale_factor": 2.0,
            "frame_width": 1280,
            "frame_height": 720,
            "camera_calibration": { "f": 500.0 }
        }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert!(s.validate().is_ok());
        assert_eq!(s.camera_calibration.f, 500.0);
    }
}
