use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use product_client::{ApiConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub(crate) const SETTINGS_FILENAME: &str = "product_scraper.ron";

/// User-editable settings read from `product_scraper.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub base_url: String,
    pub log_destination: LogDestination,
    pub log_level: String,
    /// Whole-request deadline in seconds; absent means none.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl AppSettings {
    pub(crate) fn log_level(&self) -> LevelFilter {
        product_logging::parse_level(&self.log_level).unwrap_or_else(product_logging::default_level)
    }

    pub(crate) fn api_config(&self) -> ApiConfig {
        ApiConfig {
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ApiConfig::with_base_url(self.base_url.clone())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Load settings from `dir`. A missing file is `Ok(None)`.
pub(crate) fn load_settings(dir: &Path) -> Result<Option<AppSettings>, SettingsError> {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SettingsError::Read { path, source }),
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|err| SettingsError::Parse {
            path,
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_settings(dir.path()).expect("load").is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            r#"(base_url: "http://10.0.0.5:8080/api", request_timeout_secs: Some(30))"#,
        )
        .expect("write");

        let settings = load_settings(dir.path()).expect("load").expect("settings");
        assert_eq!(settings.base_url, "http://10.0.0.5:8080/api");
        assert_eq!(settings.log_destination, LogDestination::File);
        let config = settings.api_config();
        assert_eq!(config.base_url, "http://10.0.0.5:8080/api");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(SETTINGS_FILENAME), "(base_url: 42").expect("write");

        let err = load_settings(dir.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn unknown_log_level_falls_back() {
        let settings = AppSettings {
            log_level: "loud".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.log_level(), product_logging::default_level());

        let settings = AppSettings {
            log_level: "warn".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn defaults_match_backend_address() {
        let config = AppSettings::default().api_config();
        assert_eq!(config.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.request_timeout, None);
    }
}
