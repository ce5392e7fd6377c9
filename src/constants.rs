//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! the remote endpoint, and intake limits so a rename only requires
//! changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "deepreview";

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under `~/.config/` for global config and stored credentials.
pub const CONFIG_DIR: &str = "deepreview";

/// Global config filename inside [`CONFIG_DIR`].
pub const CONFIG_FILENAME: &str = "config.toml";

/// Key-value storage filename inside [`CONFIG_DIR`].
pub const STORAGE_FILENAME: &str = "storage.json";

/// Storage key under which the API key is persisted.
pub const CREDENTIAL_KEY: &str = "deepseekApiKey";

/// Chat completions endpoint of the Deepseek API. Not configurable.
pub const DEEPSEEK_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

/// Model identifier sent with every analysis request.
pub const DEEPSEEK_MODEL: &str = "deepseek-coder";

/// Sampling temperature for analysis requests.
pub const TEMPERATURE: f32 = 0.1;

/// Completion length cap for analysis requests.
pub const MAX_TOKENS: u32 = 4000;

/// Hard upper bound on the size of an ingested file (5 MiB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Disclosure appended to rendered reviews.
pub const AI_DISCLOSURE: &str = "Generated by an AI model. Verify before acting on it.";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_MODEL: &str = "DEEPREVIEW_MODEL";
pub const ENV_STORAGE: &str = "DEEPREVIEW_STORAGE";
pub const ENV_LOG: &str = "DEEPREVIEW_LOG";
