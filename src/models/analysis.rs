//! Analysis result types: summary, issues, severities, and categories.
//!
//! The serde shape mirrors the JSON the model is instructed to return
//! (camelCase field names), so the same types are used for parsing the
//! reply and for exporting the result.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Highest value accepted for [`Summary::overall_score`].
pub const MAX_SCORE: u32 = 100;

/// Severity level of an issue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
    EnumIter, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Strict deserializer: only the four documented levels are accepted,
/// ignoring ASCII case.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.trim().parse::<Severity>().map_err(|_| {
            serde::de::Error::custom(format!(
                "unknown severity '{s}', expected one of: low, medium, high, critical"
            ))
        })
    }
}

/// Review category an issue belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Syntax,
    Logic,
    Quality,
    Security,
    Performance,
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.trim().parse::<Category>().map_err(|_| {
            serde::de::Error::custom(format!(
                "unknown category '{s}', expected one of: {}",
                Category::iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }
}

/// Location of an issue: a single line number or free text such as `"12-18"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineRef {
    Line(u64),
    Text(String),
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineRef::Line(n) => write!(f, "{n}"),
            LineRef::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A single finding reported by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Ordinal assigned by the model.
    pub id: u32,
    pub line_number: LineRef,
    pub severity: Severity,
    pub category: Category,
    pub description: String,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
}

/// Aggregate counts and score reported alongside the issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_issues: u32,
    pub syntax_errors: u32,
    pub logic_issues: u32,
    pub quality_issues: u32,
    pub security_issues: u32,
    pub performance_issues: u32,
    pub overall_score: u32,
}

impl Summary {
    /// Reported count for one category.
    pub fn count_for(&self, category: Category) -> u32 {
        match category {
            Category::Syntax => self.syntax_errors,
            Category::Logic => self.logic_issues,
            Category::Quality => self.quality_issues,
            Category::Security => self.security_issues,
            Category::Performance => self.performance_issues,
        }
    }

    /// Recompute the counts from a list of issues. The score is left at zero.
    pub fn tally(issues: &[Issue]) -> Self {
        let mut s = Summary::default();
        for issue in issues {
            s.total_issues += 1;
            match issue.category {
                Category::Syntax => s.syntax_errors += 1,
                Category::Logic => s.logic_issues += 1,
                Category::Quality => s.quality_issues += 1,
                Category::Security => s.security_issues += 1,
                Category::Performance => s.performance_issues += 1,
            }
        }
        s
    }
}

/// The structured review of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub issues: Vec<Issue>,
}

impl AnalysisResult {
    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.summary.overall_score > MAX_SCORE {
            return Err(format!(
                "overallScore {} is outside 0-{MAX_SCORE}",
                self.summary.overall_score
            ));
        }
        Ok(())
    }

    /// Whether the reported counts agree with the issue list.
    pub fn counts_consistent(&self) -> bool {
        let tally = Summary::tally(&self.issues);
        Category::iter().all(|c| tally.count_for(c) == self.summary.count_for(c))
            && tally.total_issues == self.summary.total_issues
    }

    /// Highest severity among the issues, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}
