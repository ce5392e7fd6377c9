//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use deepreview::session::FileInfo;

/// Help text shown under the command name.
pub const ABOUT: &str =
    "AI-powered code review for a single source file, backed by the Deepseek API.";

/// Print the "analysing" status line to stderr.
pub fn print_status(file: &FileInfo) {
    use colored::Colorize;
    use std::io::Write;
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(
        handle,
        "\n  {} {} {}\n",
        "Analysing".bold(),
        file.name.bold(),
        format!(
            "· {} · {} lines · {}",
            file.language,
            file.lines,
            human_size(file.size)
        )
        .dimmed(),
    );
    let _ = handle.flush();
}

/// Format a byte count for display.
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MiB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KiB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
