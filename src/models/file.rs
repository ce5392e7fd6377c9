//! The in-memory representation of an accepted source file.

use std::fmt;

/// A validated, decoded source file ready for analysis.
#[derive(Clone, PartialEq, Eq)]
pub struct IngestedFile {
    /// File name as selected (no directory components).
    pub name: String,
    /// Size in bytes as reported by the file handle.
    pub size: u64,
    /// Display label resolved from the extension table.
    pub language: &'static str,
    /// Decoded text content.
    pub content: String,
}

impl IngestedFile {
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Whether there is anything to analyse.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

// File contents can be large; keep them out of debug output and logs.
impl fmt::Debug for IngestedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("language", &self.language)
            .field("content", &format_args!("<{} chars>", self.content.len()))
            .finish()
    }
}
