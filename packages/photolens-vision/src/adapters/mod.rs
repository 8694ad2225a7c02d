//! Adapters between the plain data model and a [`VisionBackend`].
//!
//! Each adapter issues exactly one capability call and turns the observations
//! into a report. Failures never escape as panics; they come back as
//! [`VisionError`] values inside an [`AnalysisReport`] and render as a
//! sentinel line distinct from the "nothing found" case.
mod face;
mod hand_pose;
mod text;

pub use face::{analyze_faces, FaceReport, FaceSummary, FACE_FAILED, NO_FACE};
pub use hand_pose::{analyze_hand_pose, HandPoseReport, HAND_ERROR, HAND_NOT_DETECTED};
pub use text::{analyze_text, TextReport, TEXT_FAILED};

use crate::backend::{AnalysisKind, VisionBackend, VisionError};
use crate::config::AnalysisConfig;
use crate::input::ImageInput;

/// Outcome of one analysis on one image.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReport {
    Text(Result<TextReport, VisionError>),
    Faces(Result<FaceReport, VisionError>),
    HandPose(Result<HandPoseReport, VisionError>),
}

impl AnalysisReport {
    /// Runs the adapter for `kind`.
    pub async fn run(
        kind: AnalysisKind,
        backend: &dyn VisionBackend,
        image: &ImageInput,
        config: &AnalysisConfig,
    ) -> Self {
        match kind {
            AnalysisKind::Text => {
                AnalysisReport::Text(analyze_text(backend, image, &config.text_delimiter).await)
            }
            AnalysisKind::Faces => {
                AnalysisReport::Faces(analyze_faces(backend, image, config.face_policy).await)
            }
            AnalysisKind::HandPose => {
                AnalysisReport::HandPose(analyze_hand_pose(backend, image).await)
            }
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisReport::Text(_) => AnalysisKind::Text,
            AnalysisReport::Faces(_) => AnalysisKind::Faces,
            AnalysisReport::HandPose(_) => AnalysisKind::HandPose,
        }
    }

    pub fn error(&self) -> Option<&VisionError> {
        match self {
            AnalysisReport::Text(r) => r.as_ref().err(),
            AnalysisReport::Faces(r) => r.as_ref().err(),
            AnalysisReport::HandPose(r) => r.as_ref().err(),
        }
    }

    /// Display strings for this slot. Text always yields exactly one line,
    /// possibly empty.
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            AnalysisReport::Text(Ok(report)) => vec![report.text.clone()],
            AnalysisReport::Text(Err(_)) => vec![TEXT_FAILED.to_string()],
            AnalysisReport::Faces(Ok(report)) => report.display_lines(),
            AnalysisReport::Faces(Err(_)) => vec![FACE_FAILED.to_string()],
            AnalysisReport::HandPose(Ok(report)) => vec![report.to_string()],
            AnalysisReport::HandPose(Err(_)) => vec![HAND_ERROR.to_string()],
        }
    }
}
