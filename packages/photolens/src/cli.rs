//! Command line arguments backing the `photolens` binary.
use clap::{Parser, Subcommand};
use photolens::vision::{AnalysisKind, FacePolicy};
use photolens::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "photolens",
  about = "Recognize text, faces and hand poses in photos",
  version
)]
pub struct Args {
  /// Increase log output (-v info, -vv debug)
  #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Analyze a single photo and print the results
  Analyze {
    /// Image file to analyze
    image: PathBuf,

    #[command(flatten)]
    analysis: AnalysisArgs,
  },
  /// Read image paths from stdin, one per line, and show the newest results
  Watch {
    #[command(flatten)]
    analysis: AnalysisArgs,
  },
}

#[derive(clap::Args, Debug)]
pub struct AnalysisArgs {
  /// Replay recorded observations from a JSON file instead of running Vision
  #[arg(long, short = 'f')]
  pub observations: Option<PathBuf>,

  /// JSON configuration file
  #[arg(long, short = 'c')]
  pub config: Option<PathBuf>,

  /// Analyses to run (text, faces, hand-pose); defaults to all
  #[arg(long = "analysis", short = 'a', value_delimiter = ',')]
  pub analyses: Vec<AnalysisKind>,

  /// Separator between recognized text lines
  #[arg(long)]
  pub delimiter: Option<String>,

  /// How several faces are shown (all, last-wins)
  #[arg(long)]
  pub faces: Option<FacePolicy>,

  /// Print the display state as JSON
  #[arg(long)]
  pub json: bool,
}

impl AnalysisArgs {
  pub fn overrides(&self) -> ConfigOverrides {
    ConfigOverrides {
      analyses: self.analyses.clone(),
      text_delimiter: self.delimiter.clone(),
      face_policy: self.faces,
    }
  }
}
