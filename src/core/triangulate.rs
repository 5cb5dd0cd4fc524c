//! Eye-pair triangulation: two pixel coordinates → camera-relative 3D position
//!
//! Pinhole similar-triangles model with a known interpupillary distance.
//! Assumes the face is roughly frontal to the camera; there is no yaw/pitch
//! correction, so depth reads long when the head is turned. Known
//! approximation.

use crate::types::{CalibrationConfig, Point2, Vec3};

/// Recoverable triangulation failures. The caller skips the sample for the
/// tick and carries on with the previous filtered position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangulationError {
    /// The two detected eye centers coincide; depth is undefined
    DegenerateDetection,
}

impl std::fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateDetection => {
                write!(f, "detected eye centers coincide, cannot triangulate depth")
            }
        }
    }
}

impl std::error::Error for TriangulationError {}

/// Triangulate a head position from two eye centers in full-frame pixels.
///
/// Depth: `z = ipd * focal_length / px_between_eyes`. The eye-pair midpoint's
/// offset from the frame center, scaled by `z / focal_length`, gives x and y.
pub fn triangulate(
    eye1: Point2,
    eye2: Point2,
    calib: &CalibrationConfig,
) -> Result<Vec3, TriangulationError> {
    let px_between_eyes = eye1.distance(&eye2);
    if px_between_eyes == 0.0 {
        return Err(TriangulationError::DegenerateDetection);
    }

    let z = calib.interpupillary_distance_m * calib.focal_length_px / px_between_eyes;

    let mid = eye1.midpoint(&eye2);
    let x = (mid.x - calib.frame_width_px / 2.0) * z / calib.focal_length_px;
    let y = (mid.y - calib.frame_height_px / 2.0) * z / calib.focal_length_px;

    Ok(Vec3::new(x, y, z))
}

// =============================================================================
// TESTS
// =============================================================================
