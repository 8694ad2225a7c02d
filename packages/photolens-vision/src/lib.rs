pub mod adapters;
pub mod backend;
pub mod config;
pub mod geometry;
pub mod input;
pub mod observation;
pub mod replay;

#[cfg(target_os = "macos")]
pub mod apple;

pub use adapters::{
    analyze_faces, analyze_hand_pose, analyze_text, AnalysisReport, FaceReport, FaceSummary,
    HandPoseReport, TextReport,
};
pub use backend::{AnalysisKind, VisionBackend, VisionError};
pub use config::{AnalysisConfig, FacePolicy};
pub use geometry::{denormalize, format_rect, PixelRect};
pub use input::{ImageInput, ImageSize};
pub use observation::{
    FaceLandmarks, FaceObservation, HandJoint, HandPoseObservation, LandmarkRegion,
    NormalizedPoint, NormalizedRect, RecognizedPoint, TextCandidate, TextObservation,
};
pub use replay::{ReplayBackend, ReplayFixture};

#[cfg(target_os = "macos")]
pub use apple::AppleVisionBackend;
