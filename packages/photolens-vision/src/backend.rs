use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::ImageInput;
use crate::observation::{FaceObservation, HandPoseObservation, TextObservation};

/// The three analyses a backend can be asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    Text,
    Faces,
    HandPose,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [AnalysisKind::Text, AnalysisKind::Faces, AnalysisKind::HandPose];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Text => "text",
            AnalysisKind::Faces => "faces",
            AnalysisKind::HandPose => "hand-pose",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(AnalysisKind::Text),
            "faces" | "face" => Ok(AnalysisKind::Faces),
            "hand-pose" | "hand" => Ok(AnalysisKind::HandPose),
            other => Err(VisionError::UnknownAnalysis(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum VisionError {
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("unknown analysis kind: {0}")]
    UnknownAnalysis(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("invalid observation: {0}")]
    InvalidObservation(String),
    #[error("fixture error: {0}")]
    Fixture(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A vision capability able to run the three detection requests on a decoded
/// image. Implementations return fully typed observations; coordinates are
/// normalized to `[0, 1]` in the backend's own origin convention.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn recognize_text(&self, image: &ImageInput) -> Result<Vec<TextObservation>, VisionError>;

    async fn detect_faces(&self, image: &ImageInput) -> Result<Vec<FaceObservation>, VisionError>;

    async fn detect_hand_pose(
        &self,
        image: &ImageInput,
    ) -> Result<Vec<HandPoseObservation>, VisionError>;
}
