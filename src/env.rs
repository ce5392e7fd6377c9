//! Process environment lookups.
//!
//! [`Env::real()`] reads the live environment. [`Env::mock()`] serves a
//! fixed table so config overrides and the log filter can be tested
//! without mutating process state.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
enum Source {
    #[default]
    Process,
    Fixed(HashMap<String, String>),
}

/// Environment variable reader.
#[derive(Clone, Debug, Default)]
pub struct Env {
    source: Source,
}

impl Env {
    pub fn real() -> Self {
        Self {
            source: Source::Process,
        }
    }

    /// An environment containing exactly `vars`.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        let table = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            source: Source::Fixed(table),
        }
    }

    /// Raw value of `name`. Non-unicode values count as unset.
    pub fn var(&self, name: &str) -> Option<String> {
        match &self.source {
            Source::Process => std::env::var(name).ok(),
            Source::Fixed(table) => table.get(name).cloned(),
        }
    }

    /// Trimmed value of `name`; blank counts as unset.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
