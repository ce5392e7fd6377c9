//! deepreview: AI-powered single-file code review (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod env;
pub mod intake;
pub mod logging;
pub mod models;
pub mod output;
pub mod session;
