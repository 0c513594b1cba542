use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mindlore_engine::ClientSettings;
use mindlore_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const CONFIG_FILENAME: &str = "mindlore.ron";
pub(crate) const API_BASE_ENV: &str = "MINDLORE_API_BASE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogTarget,
    /// File the settings came from; `None` when running on defaults.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_base: client.api_base,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            log_destination: LogTarget::default(),
            loaded_from: None,
        }
    }
}

impl AppConfig {
    /// Applies environment overrides; `lookup` is `std::env::var` in production.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup(API_BASE_ENV).filter(|value| !value.trim().is_empty()) {
            self.api_base = base;
        }
        self
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_base: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Loads `mindlore.ron` from `dir`. A missing file yields the defaults.
pub(crate) fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let mut config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    config.loaded_from = Some(path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.log_destination, LogTarget::File);
        assert_eq!(config.loaded_from, None);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"(api_base: "http://ideas.local:9000", log_destination: Both)"#,
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.api_base, "http://ideas.local:9000");
        assert_eq!(config.log_destination, LogTarget::Both);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.loaded_from, Some(temp.path().join(CONFIG_FILENAME)));

        let settings = config.client_settings();
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "(api_base: ").unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_override_replaces_api_base_unless_blank() {
        let config = AppConfig::default()
            .with_env_overrides(|key| (key == API_BASE_ENV).then(|| "http://env:1".to_string()));
        assert_eq!(config.api_base, "http://env:1");

        let config =
            AppConfig::default().with_env_overrides(|_| Some("   ".to_string()));
        assert_eq!(config.api_base, "http://localhost:8000");
    }
}
