use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::backend::{AnalysisKind, VisionBackend, VisionError};
use crate::input::ImageInput;
use crate::observation::{FaceObservation, HandPoseObservation, TextObservation};

use super::ffi;

/// Backend running the requests through the system Vision framework.
pub struct AppleVisionBackend;

impl AppleVisionBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AppleVisionBackend {
    fn default() -> Self {
        Self::new()
    }
}

async fn perform<T>(kind: AnalysisKind, image: &ImageInput) -> Result<Vec<T>, VisionError>
where
    T: DeserializeOwned + Send + 'static,
{
    let image = image.clone();
    debug!(%kind, size = %image.size(), "performing vision request");
    tokio::task::spawn_blocking(move || ffi::analyze(kind, &image))
        .await
        .map_err(|e| VisionError::Backend(e.to_string()))?
}

#[async_trait]
impl VisionBackend for AppleVisionBackend {
    fn name(&self) -> &str {
        "apple-vision"
    }

    async fn recognize_text(&self, image: &ImageInput) -> Result<Vec<TextObservation>, VisionError> {
        perform(AnalysisKind::Text, image).await
    }

    async fn detect_faces(&self, image: &ImageInput) -> Result<Vec<FaceObservation>, VisionError> {
        let faces: Vec<FaceObservation> = perform(AnalysisKind::Faces, image).await?;
        Ok(faces.into_iter().filter_map(FaceObservation::clipped).collect())
    }

    async fn detect_hand_pose(
        &self,
        image: &ImageInput,
    ) -> Result<Vec<HandPoseObservation>, VisionError> {
        let hands: Vec<HandPoseObservation> = perform(AnalysisKind::HandPose, image).await?;
        Ok(hands.into_iter().map(HandPoseObservation::clipped).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analyze_text;
    use std::path::PathBuf;

    fn sample(name: &str) -> Option<ImageInput> {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name);
        if !path.exists() {
            eprintln!("skipping test: {name} not found");
            return None;
        }
        let bytes = std::fs::read(&path).unwrap();
        Some(ImageInput::decode(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_recognize_text_in_sample() {
        let Some(image) = sample("test_sample.png") else {
            return;
        };
        let backend = AppleVisionBackend::new();
        let report = analyze_text(&backend, &image, ", ").await.unwrap();
        println!("Text: {}", report.text);
        assert!(!report.text.is_empty(), "expected some text from image");
    }

    #[tokio::test]
    async fn test_detect_faces_in_sample() {
        let Some(image) = sample("test_face.jpg") else {
            return;
        };
        let backend = AppleVisionBackend::new();
        let faces = backend.detect_faces(&image).await.unwrap();
        assert!(!faces.is_empty(), "expected a face in the sample");
    }

    #[tokio::test]
    async fn test_blank_image_has_no_hands() {
        let image = ImageInput::from_rgba(image::RgbaImage::new(64, 64));
        let backend = AppleVisionBackend::new();
        let hands = backend.detect_hand_pose(&image).await.unwrap();
        assert!(hands.is_empty());
    }
}
