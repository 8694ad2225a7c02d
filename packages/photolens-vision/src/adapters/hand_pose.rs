use std::fmt;

use tracing::{debug, warn};

use crate::backend::{VisionBackend, VisionError};
use crate::input::ImageInput;
use crate::observation::HandJoint;

pub const HAND_NOT_DETECTED: &str = "Hand not detected";
pub const HAND_ERROR: &str = "Hand detection error";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandPoseReport {
    /// Thumb tip of the first hand exposing one, in normalized coordinates.
    ThumbTip { x: f64, y: f64, confidence: f32 },
    NotDetected,
}

impl fmt::Display for HandPoseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandPoseReport::ThumbTip { x, y, .. } => write!(f, "Thumb tip position: ({x}, {y})"),
            HandPoseReport::NotDetected => f.write_str(HAND_NOT_DETECTED),
        }
    }
}

pub async fn analyze_hand_pose(
    backend: &dyn VisionBackend,
    image: &ImageInput,
) -> Result<HandPoseReport, VisionError> {
    let observations = backend.detect_hand_pose(image).await.map_err(|e| {
        warn!(backend = backend.name(), error = %e, "hand pose detection failed");
        e
    })?;
    debug!(count = observations.len(), "hand pose observations");

    let report = observations
        .iter()
        .find_map(|o| o.joint(HandJoint::ThumbTip))
        .map(|p| HandPoseReport::ThumbTip {
            x: p.x,
            y: p.y,
            confidence: p.confidence,
        })
        .unwrap_or(HandPoseReport::NotDetected);
    Ok(report)
}
