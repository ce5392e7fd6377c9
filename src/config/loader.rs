//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. File passed with `--config`
//! 4. `~/.config/deepreview/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{
    CONFIG_DIR, CONFIG_FILENAME, DEEPSEEK_MODEL, ENV_LOG, ENV_MODEL, ENV_STORAGE,
};
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Request settings. The endpoint is always
/// [`DEEPSEEK_ENDPOINT`](crate::constants::DEEPSEEK_ENDPOINT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: DEEPSEEK_MODEL.to_string(),
        }
    }
}

/// Where the credential store keeps its file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

/// Log filter directive, e.g. `"debug"` or `"deepreview=trace"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Config {
    /// Load configuration with proper layering.
    pub fn load(explicit: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // An explicitly named file must exist.
        if let Some(path) = explicit {
            let local = Self::load_file(path)?;
            config.merge(local);
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILENAME))
    }

    /// Merge another config into this one (other wins for non-default values).
    fn merge(&mut self, other: Config) {
        let default_api = ApiConfig::default();
        if other.api.model != default_api.model {
            self.api.model = other.api.model;
        }
        if other.storage.path.is_some() {
            self.storage.path = other.storage.path;
        }
        if other.logging.level.is_some() {
            self.logging.level = other.logging.level;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(ENV_MODEL) {
            self.api.model = val;
        }
        if let Some(val) = env.non_empty(ENV_STORAGE) {
            self.storage.path = Some(PathBuf::from(val));
        }
        if let Some(val) = env.non_empty(ENV_LOG) {
            self.logging.level = Some(val);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.api.model, "deepseek-coder");
        assert!(config.storage.path.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[api]
model = "deepseek-chat"

[storage]
path = "/tmp/keys.json"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.model, "deepseek-chat");
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/keys.json")));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn merge_keeps_base_when_other_is_default() {
        let mut base = Config::default();
        base.api.model = "deepseek-chat".to_string();
        base.merge(Config::default());
        assert_eq!(base.api.model, "deepseek-chat");
    }

    #[test]
    fn merge_overrides_non_default_values() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.api.model = "deepseek-reasoner".to_string();
        other.storage.path = Some(PathBuf::from("/var/lib/dr.json"));
        base.merge(other);
        assert_eq!(base.api.model, "deepseek-reasoner");
        assert_eq!(base.storage.path, Some(PathBuf::from("/var/lib/dr.json")));
    }

    #[test]
    fn load_explicit_file() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[api]\nmodel = \"deepseek-reasoner\"\n").unwrap();

        let config = Config::load(Some(&path), &env).unwrap();
        assert_eq!(config.api.model, "deepseek-reasoner");
    }

    #[test]
    fn load_explicit_file_missing() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        let err = Config::load(Some(Path::new("/tmp/deepreview_missing.toml")), &env).unwrap_err();
        assert!(err.to_string().contains("read"));
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();
        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn env_vars_override_files() {
        let env = Env::mock([
            ("DEEPREVIEW_MODEL", "deepseek-chat"),
            ("DEEPREVIEW_STORAGE", "/tmp/s.json"),
            ("DEEPREVIEW_LOG", "trace"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.api.model, "deepseek-chat");
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(config.logging.level.as_deref(), Some("trace"));
    }

    #[test]
    fn blank_env_vars_are_ignored() {
        let env = Env::mock([("DEEPREVIEW_MODEL", "  ")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.api.model, DEEPSEEK_MODEL);
    }

    #[test]
    fn endpoint_cannot_be_redirected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[api]\nendpoint = \"http://collector.example/steal\"\nmodel = \"deepseek-chat\"\n",
        )
        .unwrap();
        let env = Env::mock([("DEEPREVIEW_ENDPOINT", "http://collector.example/steal")]);

        let config = Config::load(Some(&path), &env).unwrap();
        assert_eq!(config.api.model, "deepseek-chat");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("collector.example"), "{rendered}");
    }
}
