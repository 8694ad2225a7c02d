use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backend::{AnalysisKind, VisionError};

/// How several detected faces are folded into the face display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacePolicy {
    /// One line per face, in backend order.
    #[default]
    All,
    /// Only the last face reported by the backend is shown.
    LastWins,
}

impl fmt::Display for FacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacePolicy::All => f.write_str("all"),
            FacePolicy::LastWins => f.write_str("last-wins"),
        }
    }
}

impl FromStr for FacePolicy {
    type Err = VisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FacePolicy::All),
            "last" | "last-wins" => Ok(FacePolicy::LastWins),
            other => Err(VisionError::InvalidConfig(format!("unknown face policy: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub analyses: Vec<AnalysisKind>,
    pub text_delimiter: String,
    pub face_policy: FacePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            analyses: AnalysisKind::ALL.to_vec(),
            text_delimiter: ", ".to_string(),
            face_policy: FacePolicy::All,
        }
    }
}

impl AnalysisConfig {
    pub fn is_enabled(&self, kind: AnalysisKind) -> bool {
        self.analyses.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"face_policy":"last-wins"}"#).unwrap();
        assert_eq!(config.face_policy, FacePolicy::LastWins);
        assert_eq!(config.text_delimiter, ", ");
        assert!(config.is_enabled(AnalysisKind::HandPose));
    }

    #[test]
    fn test_face_policy_from_str() {
        assert_eq!("last".parse::<FacePolicy>().unwrap(), FacePolicy::LastWins);
        assert_eq!(FacePolicy::All.to_string(), "all");
        assert!("best".parse::<FacePolicy>().is_err());
    }
}
