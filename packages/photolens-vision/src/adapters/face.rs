use tracing::{debug, warn};

use crate::backend::{VisionBackend, VisionError};
use crate::config::FacePolicy;
use crate::geometry::format_rect;
use crate::input::ImageInput;
use crate::observation::{FaceObservation, LandmarkRegion};

pub const NO_FACE: &str = "No face detected";
pub const FACE_FAILED: &str = "Face detection failed";

#[derive(Debug, Clone, PartialEq)]
pub struct FaceSummary {
    /// Bounding box in pixels, e.g. `X: 25.00, Y: 25.00, Width: 50.00, Height: 50.00`.
    pub description: String,
    pub confidence: Option<f32>,
    /// Landmark groups present on the face and their point counts. Kept for
    /// callers, never rendered.
    pub landmarks: Vec<(LandmarkRegion, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceReport {
    pub faces: Vec<FaceSummary>,
    /// Faces reported by the backend, before the policy was applied.
    pub detected: usize,
}

impl FaceReport {
    pub fn display_lines(&self) -> Vec<String> {
        if self.faces.is_empty() {
            return vec![NO_FACE.to_string()];
        }
        self.faces.iter().map(|f| f.description.clone()).collect()
    }
}

fn summarize(observation: &FaceObservation, image: &ImageInput) -> FaceSummary {
    let landmarks: Vec<_> = observation
        .landmarks
        .as_ref()
        .map(|l| l.regions.iter().map(|(region, points)| (*region, points.len())).collect())
        .unwrap_or_default();
    FaceSummary {
        description: format_rect(&observation.bounding_box, image.size()),
        confidence: observation.confidence,
        landmarks,
    }
}

pub async fn analyze_faces(
    backend: &dyn VisionBackend,
    image: &ImageInput,
    policy: FacePolicy,
) -> Result<FaceReport, VisionError> {
    let observations = backend.detect_faces(image).await.map_err(|e| {
        warn!(backend = backend.name(), error = %e, "face detection failed");
        e
    })?;
    debug!(count = observations.len(), %policy, "face observations");

    let faces = match policy {
        FacePolicy::All => observations.iter().map(|o| summarize(o, image)).collect(),
        FacePolicy::LastWins => observations
            .last()
            .map(|o| vec![summarize(o, image)])
            .unwrap_or_default(),
    };
    Ok(FaceReport {
        faces,
        detected: observations.len(),
    })
}
