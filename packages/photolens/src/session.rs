//! Selection handling: every picked image gets a [`SelectionId`], its analyses
//! run on their own task, and results flow back over a channel where the
//! [`DisplayState`] keeps only those of the newest selection.
use photolens_vision::{
  AnalysisConfig, AnalysisKind, AnalysisReport, ImageInput, VisionBackend, VisionError,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SelectionId(u64);

impl fmt::Display for SelectionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
  /// A new image was picked; everything older is now stale.
  Selected(SelectionId),
  Analysis {
    selection: SelectionId,
    report: AnalysisReport,
  },
  DecodeFailed {
    selection: SelectionId,
    error: VisionError,
  },
  /// All analyses of the selection have reported.
  Finished(SelectionId),
}

impl SessionEvent {
  pub fn selection(&self) -> SelectionId {
    match self {
      SessionEvent::Selected(id) | SessionEvent::Finished(id) => *id,
      SessionEvent::Analysis { selection, .. } | SessionEvent::DecodeFailed { selection, .. } => {
        *selection
      }
    }
  }
}

/// Starts one analysis task per selection and feeds their results into a
/// single event channel.
pub struct Session {
  backend: Arc<dyn VisionBackend>,
  config: Arc<AnalysisConfig>,
  next: u64,
  events: mpsc::UnboundedSender<SessionEvent>,
}

impl Session {
  pub fn new(
    backend: Arc<dyn VisionBackend>,
    config: AnalysisConfig,
  ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
    let (events, rx) = mpsc::unbounded_channel();
    let session = Self {
      backend,
      config: Arc::new(config),
      next: 0,
      events,
    };
    (session, rx)
  }

  /// Registers a new selection and spawns its analyses. The `Selected` event
  /// is queued before the task starts, so every later result of an older
  /// selection arrives behind it.
  pub fn select(&mut self, bytes: Vec<u8>) -> (SelectionId, JoinHandle<()>) {
    self.next += 1;
    let selection = SelectionId(self.next);
    let _ = self.events.send(SessionEvent::Selected(selection));

    let backend = Arc::clone(&self.backend);
    let config = Arc::clone(&self.config);
    let events = self.events.clone();
    let handle = tokio::spawn(async move {
      analyze_selection(selection, bytes, backend.as_ref(), &config, &events).await;
      let _ = events.send(SessionEvent::Finished(selection));
    });
    (selection, handle)
  }
}

async fn analyze_selection(
  selection: SelectionId,
  bytes: Vec<u8>,
  backend: &dyn VisionBackend,
  config: &AnalysisConfig,
  events: &mpsc::UnboundedSender<SessionEvent>,
) {
  info!(%selection, bytes = bytes.len(), backend = backend.name(), "analyzing selection");
  let decoded = tokio::task::spawn_blocking(move || ImageInput::decode(&bytes))
    .await
    .unwrap_or_else(|e| Err(VisionError::Decode(e.to_string())));
  let image = match decoded {
    Ok(image) => image,
    Err(error) => {
      warn!(%selection, %error, "could not load image data");
      let _ = events.send(SessionEvent::DecodeFailed { selection, error });
      return;
    }
  };
  debug!(%selection, size = %image.size(), "image decoded");

  tokio::join!(
    run_analysis(AnalysisKind::Text, selection, backend, &image, config, events),
    run_analysis(AnalysisKind::Faces, selection, backend, &image, config, events),
    run_analysis(AnalysisKind::HandPose, selection, backend, &image, config, events),
  );
}

async fn run_analysis(
  kind: AnalysisKind,
  selection: SelectionId,
  backend: &dyn VisionBackend,
  image: &ImageInput,
  config: &AnalysisConfig,
  events: &mpsc::UnboundedSender<SessionEvent>,
) {
  if !config.is_enabled(kind) {
    return;
  }
  let report = AnalysisReport::run(kind, backend, image, config).await;
  if events.send(SessionEvent::Analysis { selection, report }).is_err() {
    debug!(%selection, %kind, "display gone, dropping result");
  }
}

/// One display slot and the selection that last wrote it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
  pub selection: SelectionId,
  pub lines: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

/// What the front end shows. Only this type mutates display text.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayState {
  latest: Option<SelectionId>,
  slots: BTreeMap<AnalysisKind, Slot>,
}

impl DisplayState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn latest(&self) -> Option<SelectionId> {
    self.latest
  }

  pub fn slot(&self, kind: AnalysisKind) -> Option<&Slot> {
    self.slots.get(&kind)
  }

  pub fn slots(&self) -> impl Iterator<Item = (AnalysisKind, &Slot)> {
    self.slots.iter().map(|(kind, slot)| (*kind, slot))
  }

  pub fn is_stale(&self, selection: SelectionId) -> bool {
    self.latest.is_some_and(|latest| selection < latest)
  }

  /// Applies an event; returns `true` when display text changed.
  pub fn apply(&mut self, event: &SessionEvent) -> bool {
    let selection = event.selection();
    if self.is_stale(selection) {
      debug!(%selection, latest = ?self.latest, "dropping stale event");
      return false;
    }
    self.latest = Some(selection);

    match event {
      SessionEvent::Analysis { report, .. } => {
        let slot = Slot {
          selection,
          lines: report.display_lines(),
          error: report.error().map(ToString::to_string),
        };
        self.slots.insert(report.kind(), slot);
        true
      }
      SessionEvent::Selected(_) | SessionEvent::DecodeFailed { .. } | SessionEvent::Finished(_) => {
        false
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use photolens_vision::{HandPoseReport, TextReport};

  fn text(selection: u64, value: &str) -> SessionEvent {
    SessionEvent::Analysis {
      selection: SelectionId(selection),
      report: AnalysisReport::Text(Ok(TextReport {
        text: value.to_string(),
        observations: 1,
      })),
    }
  }

  #[test]
  fn test_late_result_of_older_selection_is_dropped() {
    let mut state = DisplayState::new();
    assert!(!state.apply(&SessionEvent::Selected(SelectionId(1))));
    assert!(!state.apply(&SessionEvent::Selected(SelectionId(2))));
    assert!(state.apply(&text(2, "second")));
    assert!(!state.apply(&text(1, "first")));

    let slot = state.slot(AnalysisKind::Text).unwrap();
    assert_eq!(slot.lines, vec!["second"]);
    assert_eq!(slot.selection, SelectionId(2));
  }

  #[test]
  fn test_decode_failure_leaves_slots_untouched() {
    let mut state = DisplayState::new();
    state.apply(&SessionEvent::Selected(SelectionId(1)));
    state.apply(&text(1, "kept"));
    state.apply(&SessionEvent::Selected(SelectionId(2)));
    let changed = state.apply(&SessionEvent::DecodeFailed {
      selection: SelectionId(2),
      error: VisionError::Decode("bad bytes".into()),
    });

    assert!(!changed);
    assert_eq!(state.latest(), Some(SelectionId(2)));
    assert_eq!(state.slot(AnalysisKind::Text).unwrap().lines, vec!["kept"]);
    // Selection 1 is superseded even though 2 never produced output.
    assert!(!state.apply(&text(1, "late")));
  }

  #[test]
  fn test_error_is_recorded_on_slot() {
    let mut state = DisplayState::new();
    state.apply(&SessionEvent::Analysis {
      selection: SelectionId(1),
      report: AnalysisReport::HandPose(Err(VisionError::Backend("perform failed".into()))),
    });
    let slot = state.slot(AnalysisKind::HandPose).unwrap();
    assert_eq!(slot.lines, vec!["Hand detection error"]);
    assert_eq!(slot.error.as_deref(), Some("backend error: perform failed"));

    state.apply(&SessionEvent::Analysis {
      selection: SelectionId(1),
      report: AnalysisReport::HandPose(Ok(HandPoseReport::NotDetected)),
    });
    assert!(state.slot(AnalysisKind::HandPose).unwrap().error.is_none());
  }
}
