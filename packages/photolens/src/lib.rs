//! # photolens
//!
//! Runs text recognition, face detection and hand-pose detection on a picked
//! photo and turns the results into plain display strings.
//!
//! The vision work itself lives behind [`photolens_vision::VisionBackend`];
//! this crate owns the selection flow around it:
//!
//! - **Session**: one analysis task per selected image, results sent back over
//!   a channel tagged with the selection that produced them
//! - **Display state**: applies results of the newest selection only, so a slow
//!   analysis of an older photo never overwrites a newer one
//! - **Configuration**: JSON file plus command line overrides
//!
//! ## Quick Start
//!
//! ```ignore
//! use photolens::prelude::*;
//! use std::sync::Arc;
//!
//! let backend = Arc::new(ReplayBackend::from_path("observations.json".as_ref())?);
//! let (mut session, mut events) = Session::new(backend, AnalysisConfig::default());
//! let (selection, _) = session.select(std::fs::read("photo.jpg")?);
//!
//! let mut state = DisplayState::new();
//! while let Some(event) = events.recv().await {
//!     state.apply(&event);
//!     if event == SessionEvent::Finished(selection) {
//!         break;
//!     }
//! }
//! print!("{}", render_text(&state));
//! ```

pub mod config;
pub mod logging;
pub mod render;
pub mod session;

pub use config::{load_config, resolve_config, ConfigError, ConfigOverrides};
pub use logging::init_logging;
pub use render::{render_json, render_text};
pub use session::{DisplayState, SelectionId, Session, SessionEvent, Slot};

pub use photolens_vision as vision;

/// Prelude module for convenient imports
pub mod prelude {
  pub use crate::{
    render_json, render_text, resolve_config, ConfigOverrides, DisplayState, SelectionId, Session,
    SessionEvent, Slot,
  };
  pub use photolens_vision::{
    AnalysisConfig, AnalysisKind, AnalysisReport, FacePolicy, ImageInput, ReplayBackend,
    VisionBackend, VisionError,
  };
}
