//! A backend that answers from recorded observations instead of running a
//! model. Used where the Vision framework is unavailable and in tests.
use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{AnalysisKind, VisionBackend, VisionError};
use crate::input::ImageInput;
use crate::observation::{FaceObservation, HandPoseObservation, TextObservation};

/// Recorded backend answers. A kind listed in `failures` fails with the given
/// message instead of returning its observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayFixture {
    pub text: Vec<TextObservation>,
    pub faces: Vec<FaceObservation>,
    pub hand_poses: Vec<HandPoseObservation>,
    pub failures: BTreeMap<AnalysisKind, String>,
}

impl ReplayFixture {
    /// Clips recorded coordinates the way a live backend does.
    pub fn clipped(mut self) -> Self {
        self.faces = self.faces.into_iter().filter_map(FaceObservation::clipped).collect();
        self.hand_poses = self.hand_poses.into_iter().map(HandPoseObservation::clipped).collect();
        self
    }
}

#[derive(Debug, Clone)]
pub struct ReplayBackend {
    fixture: ReplayFixture,
}

impl ReplayBackend {
    pub fn new(fixture: ReplayFixture) -> Self {
        Self {
            fixture: fixture.clipped(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, VisionError> {
        let fixture: ReplayFixture =
            serde_json::from_str(json).map_err(|e| VisionError::Fixture(e.to_string()))?;
        Ok(Self::new(fixture))
    }

    pub fn from_path(path: &Path) -> Result<Self, VisionError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| VisionError::Fixture(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    fn answer<T: Clone>(&self, kind: AnalysisKind, observations: &[T]) -> Result<Vec<T>, VisionError> {
        if let Some(message) = self.fixture.failures.get(&kind) {
            return Err(VisionError::Backend(message.clone()));
        }
        debug!(%kind, count = observations.len(), "replaying observations");
        Ok(observations.to_vec())
    }
}

#[async_trait]
impl VisionBackend for ReplayBackend {
    fn name(&self) -> &str {
        "replay"
    }

    async fn recognize_text(&self, _image: &ImageInput) -> Result<Vec<TextObservation>, VisionError> {
        self.answer(AnalysisKind::Text, &self.fixture.text)
    }

    async fn detect_faces(&self, _image: &ImageInput) -> Result<Vec<FaceObservation>, VisionError> {
        self.answer(AnalysisKind::Faces, &self.fixture.faces)
    }

    async fn detect_hand_pose(
        &self,
        _image: &ImageInput,
    ) -> Result<Vec<HandPoseObservation>, VisionError> {
        self.answer(AnalysisKind::HandPose, &self.fixture.hand_poses)
    }
}
