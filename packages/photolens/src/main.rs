mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{AnalysisArgs, Args, Commands};
use photolens::vision::{ReplayBackend, VisionBackend};
use photolens::{
  init_logging, render_json, render_text, resolve_config, DisplayState, Session, SessionEvent,
};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[tokio::main]
async fn main() {
  let args = Args::parse();
  init_logging(args.verbose);

  let result = match args.command {
    Commands::Version => {
      println!("photolens {}", env!("CARGO_PKG_VERSION"));
      Ok(())
    }
    Commands::Analyze { image, analysis } => analyze(&image, &analysis).await,
    Commands::Watch { analysis } => watch(&analysis).await,
  };

  if let Err(e) = result {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

fn backend(observations: Option<&Path>) -> Result<Arc<dyn VisionBackend>> {
  if let Some(path) = observations {
    let replay = ReplayBackend::from_path(path)
      .with_context(|| format!("loading observations from {}", path.display()))?;
    return Ok(Arc::new(replay));
  }
  platform_backend()
}

#[cfg(target_os = "macos")]
fn platform_backend() -> Result<Arc<dyn VisionBackend>> {
  Ok(Arc::new(photolens::vision::AppleVisionBackend::new()))
}

#[cfg(not(target_os = "macos"))]
fn platform_backend() -> Result<Arc<dyn VisionBackend>> {
  bail!("no vision backend on this platform; pass --observations <FILE>")
}

fn session(args: &AnalysisArgs) -> Result<(Session, tokio::sync::mpsc::UnboundedReceiver<SessionEvent>)> {
  let config = resolve_config(args.config.as_deref(), args.overrides())?;
  let backend = backend(args.observations.as_deref())?;
  Ok(Session::new(backend, config))
}

fn print_state(state: &DisplayState, json: bool) -> Result<()> {
  if json {
    println!("{}", render_json(state)?);
  } else {
    print!("{}", render_text(state));
  }
  Ok(())
}

async fn analyze(image: &Path, args: &AnalysisArgs) -> Result<()> {
  let bytes = tokio::fs::read(image)
    .await
    .with_context(|| format!("reading {}", image.display()))?;
  let (mut session, mut events) = session(args)?;
  let (selection, _) = session.select(bytes);

  let mut state = DisplayState::new();
  while let Some(event) = events.recv().await {
    if let SessionEvent::DecodeFailed { error, .. } = &event {
      bail!("{}: {}", image.display(), error);
    }
    state.apply(&event);
    if event == SessionEvent::Finished(selection) {
      break;
    }
  }
  print_state(&state, args.json)
}

/// Each stdin line is a new selection. The display is printed whenever a
/// result of the newest selection lands; on end of input the newest selection
/// is allowed to finish.
async fn watch(args: &AnalysisArgs) -> Result<()> {
  let (mut session, mut events) = session(args)?;
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut state = DisplayState::new();
  let mut input_open = true;
  let mut pending = None;

  loop {
    tokio::select! {
      line = lines.next_line(), if input_open => {
        let Some(line) = line.context("reading stdin")? else {
          input_open = false;
          if pending.is_none() {
            break;
          }
          continue;
        };
        let path = line.trim();
        if path.is_empty() {
          continue;
        }
        match tokio::fs::read(path).await {
          Ok(bytes) => pending = Some(session.select(bytes).0),
          Err(e) => warn!(path, error = %e, "failed to load image"),
        }
      }
      Some(event) = events.recv() => {
        if state.apply(&event) {
          print_state(&state, args.json)?;
        }
        if let SessionEvent::Finished(done) = event {
          if pending == Some(done) {
            pending = None;
            if !input_open {
              break;
            }
          }
        }
      }
      else => break,
    }
  }
  Ok(())
}
