//! Output renderers: terminal and JSON, plus the JSON export artifact.

pub mod export;
pub mod json;
pub mod terminal;

use crate::models::AnalysisResult;

/// Trait for rendering an analysis result to an output format.
pub trait OutputRenderer {
    /// Render a result to a string.
    fn render(&self, result: &AnalysisResult) -> String;
}
