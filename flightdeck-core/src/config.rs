//! Settings file (`config.toml`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::airports::AirportSource;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("tick_ms must be at least 1")]
    InvalidTick,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingConfig {
    /// Milliseconds per progress tick.
    pub tick_ms: u64,
    /// Local airport document read at startup.
    pub airports_file: Option<PathBuf>,
    /// Remote airport document fetched after startup.
    pub airports_url: Option<String>,
    /// Directory for the log file.
    pub log_dir: Option<PathBuf>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 30,
            airports_file: None,
            airports_url: None,
            log_dir: None,
        }
    }
}

impl BookingConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidTick);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Source read synchronously at startup.
    pub fn initial_source(&self) -> AirportSource {
        match &self.airports_file {
            Some(path) => AirportSource::File(path.clone()),
            None => AirportSource::Bundled,
        }
    }

    /// Source refreshed in the background, if any.
    pub fn refresh_source(&self) -> Option<AirportSource> {
        self.airports_url.clone().map(AirportSource::Url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = BookingConfig::default();
        assert_eq!(c.tick_interval(), Duration::from_millis(30));
        assert_eq!(c.initial_source(), AirportSource::Bundled);
        assert!(c.refresh_source().is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let c = BookingConfig::from_toml(r#"airports_url = "http://localhost/airports.json""#).unwrap();
        assert_eq!(c.tick_ms, 30);
        assert_eq!(
            c.refresh_source(),
            Some(AirportSource::Url("http://localhost/airports.json".into()))
        );
    }

    #[test]
    fn zero_tick_rejected() {
        assert!(matches!(
            BookingConfig::from_toml("tick_ms = 0"),
            Err(ConfigError::InvalidTick)
        ));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(
            BookingConfig::from_toml("tick = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let c = BookingConfig::load(Path::new("/nonexistent/flightdeck/config.toml")).unwrap();
        assert_eq!(c, BookingConfig::default());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tick_ms = 5\nairports_file = \"airports.json\"\n").unwrap();
        let c = BookingConfig::load(&path).unwrap();
        assert_eq!(c.tick_ms, 5);
        assert_eq!(
            c.initial_source(),
            AirportSource::File(PathBuf::from("airports.json"))
        );
    }
}
