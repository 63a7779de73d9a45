/// Player configuration
use crate::error::{AppError, Result};
use lofi_catalog::CatalogConfig;
use lofi_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "lofi.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    /// Number of tracks requested from the catalog
    #[serde(default = "default_track_limit")]
    pub track_limit: usize,

    /// Simulated media clock resolution in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Length the simulated output reports for every preview
    #[serde(default = "default_preview_seconds")]
    pub preview_seconds: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            player: PlayerConfig::default(),
            track_limit: default_track_limit(),
            tick_ms: default_tick_ms(),
            preview_seconds: default_preview_seconds(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `lofi.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading `LOFI_` variables from `env` instead
    /// of the process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (LOFI_TRACK_LIMIT, LOFI_PLAYER__VOLUME, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("LOFI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.track_limit == 0 {
            return Err(AppError::Config(
                "track_limit must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.player.ambient_volume) {
            return Err(AppError::Config(format!(
                "player.ambient_volume must be between 0 and 1, got {}",
                self.player.ambient_volume
            )));
        }

        if self.player.volume > 100 {
            return Err(AppError::Config(format!(
                "player.volume must be between 0 and 100, got {}",
                self.player.volume
            )));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(AppError::Config(
                "catalog.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.tick_ms == 0 {
            return Err(AppError::Config("tick_ms must be positive".to_string()));
        }

        if !self.preview_seconds.is_finite() || self.preview_seconds <= 0.0 {
            return Err(AppError::Config(format!(
                "preview_seconds must be positive, got {}",
                self.preview_seconds
            )));
        }

        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

// Default values
fn default_track_limit() -> usize {
    10
}

fn default_tick_ms() -> u64 {
    250
}

fn default_preview_seconds() -> f64 {
    30.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();

        assert_eq!(config.track_limit, 10);
        assert_eq!(config.tick(), Duration::from_millis(250));
        assert_eq!(config.player.volume, 80);
        assert_eq!(config.catalog.query, "lofi");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_nested_sections_from_file() {
        let file = write_config(
            r#"
track_limit = 5

[catalog]
query = "chillhop"
proxy = "https://corsproxy.io/?"

[player]
ambient_volume = 0.5
revert_on_play_rejection = true
"#,
        );

        let config = AppConfig::load_with_env(Some(file.path()), no_env()).unwrap();

        assert_eq!(config.track_limit, 5);
        assert_eq!(config.catalog.query, "chillhop");
        assert_eq!(config.catalog.proxy.as_deref(), Some("https://corsproxy.io/?"));
        assert_eq!(config.player.ambient_volume, 0.5);
        assert!(config.player.revert_on_play_rejection);
        // Untouched fields keep their defaults
        assert_eq!(config.player.volume, 80);
        assert_eq!(config.tick_ms, 250);
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("track_limit = 5\n");
        let mut env = config::Map::new();
        env.insert("LOFI_TRACK_LIMIT".to_string(), "3".to_string());
        env.insert("LOFI_PLAYER__VOLUME".to_string(), "40".to_string());

        let config = AppConfig::load_with_env(Some(file.path()), Some(env)).unwrap();

        assert_eq!(config.track_limit, 3);
        assert_eq!(config.player.volume, 40);
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let result = AppConfig::load_with_env(Some(Path::new("/nonexistent/lofi.toml")), no_env());

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = AppConfig {
            track_limit: 0,
            ..AppConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_ambient_volume_is_rejected() {
        let mut config = AppConfig::default();
        config.player.ambient_volume = 1.5;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ambient_volume"));
    }

    #[test]
    fn zero_catalog_timeout_is_rejected() {
        let mut config = AppConfig::default();
        config.catalog.timeout_secs = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let config = AppConfig {
            tick_ms: 0,
            ..AppConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
