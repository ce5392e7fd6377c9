//! Terminal renderer: score header, category breakdown, then issues.
//!
//! Output style follows the flowing, table-free layout used for findings.

use colored::Colorize;
use strum::IntoEnumIterator;

use crate::models::{AnalysisResult, Category, Severity};
use crate::output::OutputRenderer;

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, result: &AnalysisResult) -> String {
        let summary = &result.summary;
        let mut output = String::new();

        let score = summary.overall_score.to_string();
        let score = match summary.overall_score {
            80.. => score.green().bold(),
            50..=79 => score.yellow().bold(),
            _ => score.red().bold(),
        };
        output.push_str(&format!(" {} {}/100\n", "Score:".bold(), score));

        let breakdown: Vec<String> = Category::iter()
            .map(|c| format!("{} {}", summary.count_for(c).to_string().bold(), c))
            .collect();
        output.push_str(&format!(
            " {} {}  ({})\n\n",
            summary.total_issues.to_string().bold(),
            if summary.total_issues == 1 { "issue" } else { "issues" },
            breakdown.join(", ").dimmed(),
        ));

        if result.issues.is_empty() {
            output.push_str(&format!("{}", "  ✔ No issues found.\n".green()));
        }

        for issue in &result.issues {
            let (icon, severity_str) = severity_style(issue.severity);
            output.push_str(&format!(
                " {} {} {} at line {}\n",
                icon,
                severity_str,
                issue.category.to_string().bold(),
                issue.line_number.to_string().bold(),
            ));
            output.push_str(&format!("   {}\n", issue.description));
            output.push_str(&format!("   {} {}\n", "→".cyan(), issue.suggestion));

            if let Some(ref example) = issue.code_example {
                for line in example.lines() {
                    output.push_str(&format!("     {}\n", line.dimmed()));
                }
            }

            output.push('\n');
        }

        output.push_str(&format!("{}\n", "───────────────────────────────────".dimmed()));
        output.push_str(&format!(
            " {}\n",
            crate::constants::AI_DISCLOSURE.dimmed()
        ));

        output
    }
}

fn severity_style(severity: Severity) -> (String, String) {
    let label = severity.to_string();
    match severity {
        Severity::Critical => ("✖".red().bold().to_string(), label.red().bold().to_string()),
        Severity::High => ("✖".red().to_string(), label.red().to_string()),
        Severity::Medium => ("⚠".yellow().bold().to_string(), label.yellow().bold().to_string()),
        Severity::Low => ("ℹ".blue().bold().to_string(), label.blue().bold().to_string()),
    }
}
