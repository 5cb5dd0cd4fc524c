//! Detection result handed over by the face/eye detector once per tick

use serde::{Deserialize, Serialize};

use crate::types::Point2;

/// What the detector found in the current frame.
///
/// `Lost` and `FaceOnly` are legitimate steady state, not errors: the
/// scheduler keeps running on the last known filtered position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind")]
pub enum Detection {
    /// Lost sight of the face completely
    Lost,
    /// Found a face, but could not resolve both eyes inside it
    FaceOnly,
    /// Found a face with exactly two eyes; centers in full-frame pixels
    FaceAndEyes { eye1: Point2, eye2: Point2 },
}

impl Detection {
    /// Parse a detection line as fed by the CLI shell or a replay file.
    ///
    /// Accepted forms:
    ///   `lost`
    ///   `face`
    ///   `eyes X1 Y1 X2 Y2`
    pub fn parse(line: &str) -> Option<Detection> {
        let mut parts = line.split_whitespace();
        match parts.next()? {
            "lost" => Some(Detection::Lost),
            "face" => Some(Detection::FaceOnly),
            "eyes" => {
                let coords: Vec<f64> = parts.map(str::parse).collect::<Result<_, _>>().ok()?;
                if coords.len() != 4 {
                    return None;
                }
                Some(Detection::FaceAndEyes {
                    eye1: Point2::new(coords[0], coords[1]),
                    eye2: Point2::new(coords[2], coords[3]),
                })
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Detection::Lost => "LOST",
            Detection::FaceOnly => "FACE_ONLY",
            Detection::FaceAndEyes { .. } => "FACE_AND_EYES",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
