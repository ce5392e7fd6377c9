//! Reply parsing: envelope unwrapping and JSON span extraction.
//!
//! Models do not reliably return bare JSON. The reply text is run through
//! an ordered list of extraction strategies; the first span that parses
//! into a valid [`AnalysisResult`] wins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::AnalysisError;
use crate::models::AnalysisResult;

/// Fenced block labelled `json`. The closing fence must start a line so
/// backticks inside string values (e.g. `codeExample`) do not end the match.
static FENCED_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("valid fence regex")
});

/// One way of locating a JSON payload inside reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Contents of the first ```` ```json ```` fenced block.
    FencedJson,
    /// From the first `{` to the last `}`.
    BareObject,
    /// The whole reply, trimmed.
    RawText,
}

/// Strategies in the order they are tried.
pub const STRATEGIES: [ExtractionStrategy; 3] = [
    ExtractionStrategy::FencedJson,
    ExtractionStrategy::BareObject,
    ExtractionStrategy::RawText,
];

impl ExtractionStrategy {
    pub fn extract(self, text: &str) -> Option<&str> {
        match self {
            ExtractionStrategy::FencedJson => FENCED_JSON_RE
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty()),
            ExtractionStrategy::BareObject => {
                let start = text.find('{')?;
                let end = text.rfind('}')?;
                (start < end).then(|| &text[start..=end])
            }
            ExtractionStrategy::RawText => Some(text.trim()).filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a completions response body.
pub fn reply_text(body: &str) -> Result<String, AnalysisError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::Parse(format!("unexpected response envelope: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AnalysisError::Parse("response contained no reply text".to_string()))
}

/// Parse reply text into a validated [`AnalysisResult`].
pub fn parse_analysis(reply: &str) -> Result<AnalysisResult, AnalysisError> {
    let mut last_error = String::from("reply was empty");

    for strategy in STRATEGIES {
        let Some(span) = strategy.extract(reply) else {
            continue;
        };
        match serde_json::from_str::<AnalysisResult>(span)
            .map_err(|e| e.to_string())
            .and_then(|r| r.validate().map(|()| r))
        {
            Ok(result) => {
                tracing::debug!(?strategy, issues = result.issues.len(), "parsed analysis reply");
                return Ok(result);
            }
            Err(e) => {
                tracing::debug!(?strategy, error = %e, "candidate span rejected");
                last_error = e;
            }
        }
    }

    Err(AnalysisError::Parse(last_error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, LineRef, Severity};
    use pretty_assertions::assert_eq;

    const EMPTY_RESULT: &str = r#"{"summary":{"totalIssues":0,"syntaxErrors":0,"logicIssues":0,"qualityIssues":0,"securityIssues":0,"performanceIssues":0,"overallScore":95},"issues":[]}"#;

    #[test]
    fn fenced_block_is_extracted() {
        let reply = format!("Here you go:\n```json\n{EMPTY_RESULT}\n```\nThanks!");
        assert_eq!(ExtractionStrategy::FencedJson.extract(&reply), Some(EMPTY_RESULT));
        let result = parse_analysis(&reply).unwrap();
        assert!(result.issues.is_empty());
        assert_eq!(result.summary.overall_score, 95);
    }

    #[test]
    fn fence_ignores_backticks_inside_strings() {
        let reply = "```json\n{\"summary\":{\"totalIssues\":1,\"syntaxErrors\":0,\"logicIssues\":1,\"qualityIssues\":0,\"securityIssues\":0,\"performanceIssues\":0,\"overallScore\":70},\"issues\":[{\"id\":1,\"lineNumber\":\"3-4\",\"severity\":\"high\",\"category\":\"Logic\",\"description\":\"Wrong operator\",\"suggestion\":\"Use ```+``` instead\",\"codeExample\":\"return a + b\"}]}\n```";
        let result = parse_analysis(reply).unwrap();
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].line_number, LineRef::Text("3-4".into()));
        assert_eq!(result.issues[0].severity, Severity::High);
        assert_eq!(result.issues[0].category, Category::Logic);
    }

    #[test]
    fn bare_object_in_prose() {
        let reply = format!("Analysis complete. {EMPTY_RESULT} Let me know!");
        assert_eq!(ExtractionStrategy::FencedJson.extract(&reply), None);
        assert_eq!(ExtractionStrategy::BareObject.extract(&reply), Some(EMPTY_RESULT));
        assert!(parse_analysis(&reply).is_ok());
    }

    #[test]
    fn unlabelled_fence_falls_back_to_bare_object() {
        let reply = format!("```\n{EMPTY_RESULT}\n```");
        assert!(parse_analysis(&reply).is_ok());
    }

    #[test]
    fn raw_text_is_last_resort() {
        assert_eq!(ExtractionStrategy::RawText.extract("  plain  "), Some("plain"));
        assert_eq!(ExtractionStrategy::RawText.extract("   "), None);
    }

    #[test]
    fn prose_without_json_is_a_parse_error() {
        let err = parse_analysis("The code looks fine to me, no issues.").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "Failed to parse analysis results. Please try again."
        );
    }

    #[test]
    fn later_strategy_used_when_fence_is_invalid() {
        let reply = format!("```json\nnot json\n```\n{EMPTY_RESULT}");
        assert!(parse_analysis(&reply).is_ok());
    }

    #[test]
    fn missing_summary_field_is_rejected() {
        let reply = r#"{"summary":{"totalIssues":0},"issues":[]}"#;
        let err = parse_analysis(reply).unwrap_err();
        let AnalysisError::Parse(detail) = err else {
            panic!("expected parse error");
        };
        assert!(detail.contains("missing field"), "got: {detail}");
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let reply = EMPTY_RESULT.replace("95", "250");
        assert!(parse_analysis(&reply).is_err());
    }

    #[test]
    fn reply_text_from_envelope() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"hello"}}]}"#;
        assert_eq!(reply_text(body).unwrap(), "hello");
    }

    #[test]
    fn reply_text_without_choices() {
        let err = reply_text(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
        assert!(reply_text("<html>").is_err());
    }
}
