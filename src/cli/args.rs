//! Clap argument types and result gating.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};

use deepreview::models::{AnalysisResult, Severity};

/// AI-powered code review for a single source file.
#[derive(Parser, Debug)]
#[command(
    name = "deepreview",
    version = deepreview::constants::VERSION,
    about = super::ABOUT,
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Additional config file layered over the global one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Review a source file.
    Review(Box<ReviewArgs>),

    /// Manage the stored Deepseek API key.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// List supported file extensions.
    Languages,

    /// Print version information.
    Version,
}

/// API key management subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum KeyAction {
    /// Store an API key (replaces any existing one).
    Set {
        /// The API key string.
        key: String,
    },
    /// Remove the stored API key.
    Clear,
    /// Show whether a key is stored (masked).
    Status,
    /// Print the storage file path.
    Path,
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// File(s) to review. Only the first is analysed.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    // --- Credential ---
    /// Store this API key before reviewing.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    // --- Output ---
    /// Output format.
    #[arg(long, default_value = "terminal")]
    pub format: OutputFormat,

    /// Write the result to code-review-<file>.json.
    #[arg(long, default_value_t = false)]
    pub export: bool,

    /// Directory for --export.
    #[arg(long, default_value = ".", requires = "export")]
    pub export_dir: PathBuf,

    // --- Gating ---
    /// Exit non-zero if any issue meets this severity.
    #[arg(long)]
    pub fail_on: Option<Severity>,

    /// Exit non-zero if the overall score is below this value.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub min_score: Option<u32>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Render a result using the renderer for this format.
    pub fn render(&self, result: &AnalysisResult) -> String {
        use deepreview::output::OutputRenderer;
        match self {
            OutputFormat::Terminal => deepreview::output::terminal::TerminalRenderer.render(result),
            OutputFormat::Json => deepreview::output::json::JsonRenderer.render(result),
        }
    }
}

impl ReviewArgs {
    /// The file to review. Further paths are ignored and never opened.
    pub fn target(&self) -> Option<&Path> {
        let (first, rest) = self.files.split_first()?;
        if !rest.is_empty() {
            tracing::debug!(ignored = rest.len(), "only the first file is reviewed");
        }
        Some(first)
    }

    /// Reason the run should fail under `--fail-on` / `--min-score`, if any.
    pub fn gate_failure(&self, result: &AnalysisResult) -> Option<String> {
        if let Some(threshold) = self.fail_on {
            if result.max_severity().is_some_and(|worst| worst >= threshold) {
                let failing = result
                    .issues
                    .iter()
                    .filter(|i| i.severity >= threshold)
                    .count();
                return Some(format!(
                    "found {failing} issue(s) at or above {threshold} severity"
                ));
            }
        }
        if let Some(min) = self.min_score {
            if result.summary.overall_score < min {
                return Some(format!(
                    "overall score {} is below the minimum of {min}",
                    result.summary.overall_score
                ));
            }
        }
        None
    }
}
