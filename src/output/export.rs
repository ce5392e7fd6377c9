//! Downloadable JSON export of a result.

use std::path::{Path, PathBuf};

use crate::models::AnalysisResult;
use crate::output::OutputRenderer;
use crate::output::json::JsonRenderer;

/// A named JSON document ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// `code-review-<source name>.json`, or `code-review-results.json` without one.
pub fn export_file_name(source_name: Option<&str>) -> String {
    let name = source_name.filter(|n| !n.is_empty()).unwrap_or("results");
    format!("code-review-{name}.json")
}

pub fn build_artifact(result: &AnalysisResult, source_name: Option<&str>) -> ExportArtifact {
    ExportArtifact {
        file_name: export_file_name(source_name),
        contents: JsonRenderer.render(result),
    }
}

/// Write an artifact into `dir`, returning the full path.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Summary;

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            summary: Summary {
                overall_score: 100,
                ..Summary::default()
            },
            issues: vec![],
        }
    }

    #[test]
    fn file_name_uses_source_name() {
        assert_eq!(export_file_name(Some("app.tsx")), "code-review-app.tsx.json");
        assert_eq!(export_file_name(None), "code-review-results.json");
        assert_eq!(export_file_name(Some("")), "code-review-results.json");
    }

    #[test]
    fn write_artifact_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = build_artifact(&empty_result(), Some("main.rs"));
        let path = write_artifact(dir.path(), &artifact).unwrap();

        assert_eq!(path.file_name().unwrap(), "code-review-main.rs.json");
        let written: AnalysisResult =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, empty_result());
    }
}
