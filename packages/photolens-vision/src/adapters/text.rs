use tracing::{debug, warn};

use crate::backend::{VisionBackend, VisionError};
use crate::input::ImageInput;

pub const TEXT_FAILED: &str = "Text recognition failed";

#[derive(Debug, Clone, PartialEq)]
pub struct TextReport {
    /// Top candidates of every observation, joined in observation order.
    pub text: String,
    pub observations: usize,
}

pub async fn analyze_text(
    backend: &dyn VisionBackend,
    image: &ImageInput,
    delimiter: &str,
) -> Result<TextReport, VisionError> {
    let observations = backend.recognize_text(image).await.map_err(|e| {
        warn!(backend = backend.name(), error = %e, "text recognition failed");
        e
    })?;
    debug!(count = observations.len(), "text observations");

    let text = observations
        .iter()
        .filter_map(|o| o.top_candidate())
        .map(|c| c.string.as_str())
        .collect::<Vec<_>>()
        .join(delimiter);
    Ok(TextReport {
        text,
        observations: observations.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::testing::{blank_image, CannedBackend};
    use crate::input::ImageSize;
    use crate::observation::{TextCandidate, TextObservation};

    fn line(candidates: &[(&str, f32)]) -> TextObservation {
        TextObservation {
            candidates: candidates
                .iter()
                .map(|(s, c)| TextCandidate {
                    string: s.to_string(),
                    confidence: *c,
                })
                .collect(),
        }
    }

    fn image() -> ImageInput {
        blank_image(ImageSize { width: 8, height: 8 })
    }

    #[tokio::test]
    async fn test_no_observations_yield_empty_text() {
        let backend = CannedBackend::default();
        let report = analyze_text(&backend, &image(), ", ").await.unwrap();
        assert_eq!(report.text, "");
        assert_eq!(report.observations, 0);
    }

    #[tokio::test]
    async fn test_top_candidates_joined_in_order() {
        let backend = CannedBackend {
            text: Ok(vec![
                line(&[("OPEN", 0.95), ("0PEN", 0.4)]),
                line(&[("24h", 0.3), ("24 HOURS", 0.8)]),
                line(&[]),
                line(&[("Pharmacy", 0.7)]),
            ]),
            ..Default::default()
        };
        let report = analyze_text(&backend, &image(), ", ").await.unwrap();
        assert_eq!(report.text, "OPEN, 24 HOURS, Pharmacy");
        assert_eq!(report.observations, 4);
    }

    #[tokio::test]
    async fn test_single_observation_has_no_delimiter() {
        let backend = CannedBackend {
            text: Ok(vec![line(&[("EXIT", 0.9)])]),
            ..Default::default()
        };
        let report = analyze_text(&backend, &image(), " | ").await.unwrap();
        assert_eq!(report.text, "EXIT");
    }

    #[tokio::test]
    async fn test_backend_error_is_returned() {
        let backend = CannedBackend {
            text: Err(VisionError::Backend("request handler failed".into())),
            ..Default::default()
        };
        let err = analyze_text(&backend, &image(), ", ").await.unwrap_err();
        assert_eq!(err, VisionError::Backend("request handler failed".into()));
    }
}
