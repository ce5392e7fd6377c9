//! JSON output renderer.
//!
//! Outputs the result in the same `{"summary": {...}, "issues": [...]}`
//! shape the model returns, indented.

use crate::models::AnalysisResult;
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Issue, LineRef, Severity, Summary};
    use pretty_assertions::assert_eq;

    #[test]
    fn render_json_uses_camel_case() {
        let result = AnalysisResult {
            summary: Summary {
                total_issues: 1,
                security_issues: 1,
                overall_score: 40,
                ..Summary::default()
            },
            issues: vec![Issue {
                id: 1,
                line_number: LineRef::Line(7),
                severity: Severity::Critical,
                category: Category::Security,
                description: "SQL built by string concatenation".into(),
                suggestion: "Use bound parameters".into(),
                code_example: None,
            }],
        };

        let output = JsonRenderer.render(&result);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["summary"]["securityIssues"], 1);
        assert_eq!(parsed["summary"]["overallScore"], 40);
        assert_eq!(parsed["issues"][0]["lineNumber"], 7);
        assert_eq!(parsed["issues"][0]["severity"], "critical");
        assert_eq!(parsed["issues"][0]["category"], "Security");
        assert!(parsed["issues"][0].get("codeExample").is_none());
        assert!(output.contains("\n  "), "output should be indented");
    }
}
