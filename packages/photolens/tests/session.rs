//! Integration tests for selection handling against a controllable backend

use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use photolens::prelude::*;
use photolens::vision::{
    FaceObservation, HandPoseObservation, NormalizedRect, TextCandidate, TextObservation,
};
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Answers with the image size as text; images 10 pixels wide wait for the
/// gate to open before answering.
struct GatedBackend {
    gate: Semaphore,
}

impl GatedBackend {
    async fn hold(&self, image: &ImageInput) {
        if image.size().width == 10 {
            let _permit = self.gate.acquire().await.unwrap();
        }
    }
}

#[async_trait]
impl VisionBackend for GatedBackend {
    fn name(&self) -> &str {
        "gated"
    }

    async fn recognize_text(&self, image: &ImageInput) -> Result<Vec<TextObservation>, VisionError> {
        self.hold(image).await;
        Ok(vec![TextObservation {
            candidates: vec![TextCandidate {
                string: image.size().to_string(),
                confidence: 1.0,
            }],
        }])
    }

    async fn detect_faces(&self, image: &ImageInput) -> Result<Vec<FaceObservation>, VisionError> {
        self.hold(image).await;
        Ok(vec![FaceObservation {
            bounding_box: NormalizedRect::new(0.5, 0.5, 0.5, 0.5),
            confidence: None,
            landmarks: None,
        }])
    }

    async fn detect_hand_pose(
        &self,
        image: &ImageInput,
    ) -> Result<Vec<HandPoseObservation>, VisionError> {
        self.hold(image).await;
        Err(VisionError::Backend("no hand model".into()))
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Applies events until `selection` finishes; returns how many results were
/// rejected as stale.
async fn drain_until_finished(
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    state: &mut DisplayState,
    selection: SelectionId,
) -> usize {
    let mut rejected = 0;
    while let Some(event) = events.recv().await {
        let is_result = matches!(event, SessionEvent::Analysis { .. });
        if !state.apply(&event) && is_result {
            rejected += 1;
        }
        if event == SessionEvent::Finished(selection) {
            break;
        }
    }
    rejected
}

#[tokio::test]
async fn test_late_results_of_superseded_selection_are_discarded() {
    let backend = Arc::new(GatedBackend {
        gate: Semaphore::new(0),
    });
    let (mut session, mut events) = Session::new(backend.clone(), AnalysisConfig::default());
    let mut state = DisplayState::new();

    let (first, first_task) = session.select(png(10, 10));
    let (second, _) = session.select(png(20, 40));
    assert!(first < second);

    assert_eq!(drain_until_finished(&mut events, &mut state, second).await, 0);
    let text = state.slot(AnalysisKind::Text).unwrap();
    assert_eq!(text.lines, vec!["20x40"]);
    assert_eq!(text.selection, second);

    // Let the first selection finish late.
    backend.gate.add_permits(3);
    first_task.await.unwrap();
    assert_eq!(drain_until_finished(&mut events, &mut state, first).await, 3);

    assert_eq!(state.latest(), Some(second));
    assert_eq!(state.slot(AnalysisKind::Text).unwrap().lines, vec!["20x40"]);
    assert_eq!(
        state.slot(AnalysisKind::Faces).unwrap().lines,
        vec!["X: 10.00, Y: 20.00, Width: 10.00, Height: 20.00"]
    );
    let hand = state.slot(AnalysisKind::HandPose).unwrap();
    assert_eq!(hand.lines, vec!["Hand detection error"]);
    assert_eq!(hand.error.as_deref(), Some("backend error: no hand model"));
}

#[tokio::test]
async fn test_undecodable_selection_reports_and_finishes() {
    let backend = Arc::new(GatedBackend {
        gate: Semaphore::new(0),
    });
    let (mut session, mut events) = Session::new(backend, AnalysisConfig::default());

    let (selection, task) = session.select(b"garbage".to_vec());
    task.await.unwrap();

    assert_eq!(events.recv().await, Some(SessionEvent::Selected(selection)));
    match events.recv().await {
        Some(SessionEvent::DecodeFailed { selection: failed, error }) => {
            assert_eq!(failed, selection);
            assert!(matches!(error, VisionError::Decode(_)));
        }
        other => panic!("expected decode failure, got {other:?}"),
    }
    assert_eq!(events.recv().await, Some(SessionEvent::Finished(selection)));
}

#[tokio::test]
async fn test_only_enabled_analyses_report() {
    let backend = Arc::new(GatedBackend {
        gate: Semaphore::new(0),
    });
    let config = AnalysisConfig {
        analyses: vec![AnalysisKind::Text],
        ..AnalysisConfig::default()
    };
    let (mut session, mut events) = Session::new(backend, config);
    let mut state = DisplayState::new();

    let (selection, _) = session.select(png(30, 30));
    drain_until_finished(&mut events, &mut state, selection).await;

    assert_eq!(state.slots().count(), 1);
    assert_eq!(render_text(&state), "text: 30x30\n");
}
