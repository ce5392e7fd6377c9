//! Shared types used across all modules.
//!
//! This module defines the data handed between intake, analysis, the
//! session, and the renderers. Other modules import from here rather
//! than reaching into each other's internals.

pub mod analysis;
pub mod file;

pub use analysis::{AnalysisResult, Category, Issue, LineRef, Severity, Summary};
pub use file::IngestedFile;
