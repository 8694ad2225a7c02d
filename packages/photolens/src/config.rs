//! Analysis settings: an optional JSON file, then command line overrides.
use photolens_vision::{AnalysisConfig, AnalysisKind, FacePolicy};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("could not read config {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("could not parse config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
  #[error("no analyses enabled")]
  NoAnalyses,
}

/// Values given on the command line. Empty / `None` fields leave the loaded
/// configuration untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub analyses: Vec<AnalysisKind>,
  pub text_delimiter: Option<String>,
  pub face_policy: Option<FacePolicy>,
}

impl ConfigOverrides {
  pub fn apply(self, config: &mut AnalysisConfig) {
    if !self.analyses.is_empty() {
      config.analyses = self.analyses;
    }
    if let Some(delimiter) = self.text_delimiter {
      config.text_delimiter = delimiter;
    }
    if let Some(policy) = self.face_policy {
      config.face_policy = policy;
    }
  }
}

pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
  let Some(path) = path else {
    return Ok(AnalysisConfig::default());
  };
  let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Loads, applies overrides and normalizes the analysis list (sorted, no
/// duplicates).
pub fn resolve_config(
  path: Option<&Path>,
  overrides: ConfigOverrides,
) -> Result<AnalysisConfig, ConfigError> {
  let mut config = load_config(path)?;
  overrides.apply(&mut config);
  config.analyses.sort();
  config.analyses.dedup();
  if config.analyses.is_empty() {
    return Err(ConfigError::NoAnalyses);
  }
  Ok(config)
}
