//! Airport directory: read-only lookup of known airports by IATA code.
//!
//! The directory is loaded once from one of three sources (compiled-in list,
//! local JSON file, HTTP fetch of the same document) and never mutated
//! afterwards. A failed load degrades to an empty directory; callers keep the
//! [`DirectoryError`] so the degraded state can be shown to the user.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Airport list shipped with the binary.
const BUNDLED_AIRPORTS: &str = include_str!("../data/airports.json");

/// A single airport record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub code: String,
    pub city: String,
    pub country: String,
}

/// Errors from loading an airport document.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("read airport file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse airport JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fetch airports from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("airport server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },
}

/// Where an airport document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirportSource {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl fmt::Display for AirportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirportSource::Bundled => write!(f, "bundled list"),
            AirportSource::File(path) => write!(f, "{}", path.display()),
            AirportSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Load state of the directory, shown next to the airport pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryStatus {
    Bundled,
    Loaded { source: String, count: usize },
    Degraded { reason: String },
}

impl DirectoryStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, DirectoryStatus::Degraded { .. })
    }
}

/// Both document shapes seen in the wild: `[...]` and `{ "airports": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AirportDocument {
    List(Vec<Airport>),
    Wrapped { airports: Vec<Airport> },
}

/// Read-only collection of airports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirportDirectory {
    airports: Vec<Airport>,
}

impl AirportDirectory {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The ten airports compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_json_str(BUNDLED_AIRPORTS).unwrap_or_else(|e| {
            warn!(error = %e, "bundled airport list is unreadable");
            Self::empty()
        })
    }

    /// Parse either accepted document shape.
    pub fn from_json_str(content: &str) -> Result<Self, DirectoryError> {
        let airports = match serde_json::from_str::<AirportDocument>(content)? {
            AirportDocument::List(airports) => airports,
            AirportDocument::Wrapped { airports } => airports,
        };
        Ok(Self { airports })
    }

    /// Load from a local JSON file.
    pub fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Fetch the same JSON document over HTTP. Blocks; call from a worker.
    pub fn fetch(url: &str) -> Result<Self, DirectoryError> {
        let fetch_err = |e: reqwest::Error| DirectoryError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(fetch_err)?;

        let response = client.get(url).send().map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(fetch_err)?;
        Self::from_json_str(&body)
    }

    /// Load from any source, propagating failures.
    pub fn try_load(source: &AirportSource) -> Result<Self, DirectoryError> {
        match source {
            AirportSource::Bundled => Ok(Self::bundled()),
            AirportSource::File(path) => Self::from_file(path),
            AirportSource::Url(url) => Self::fetch(url),
        }
    }

    /// Load from any source, degrading to an empty directory on failure.
    ///
    /// The error is handed back alongside the (empty) directory so the caller
    /// can surface it instead of presenting an unexplained empty list.
    pub fn load(source: &AirportSource) -> (Self, DirectoryStatus, Option<DirectoryError>) {
        match Self::try_load(source) {
            Ok(directory) => {
                info!(%source, count = directory.len(), "airport directory loaded");
                let status = match source {
                    AirportSource::Bundled => DirectoryStatus::Bundled,
                    other => DirectoryStatus::Loaded {
                        source: other.to_string(),
                        count: directory.len(),
                    },
                };
                (directory, status, None)
            }
            Err(e) => {
                warn!(%source, error = %e, "airport directory unavailable, continuing with none");
                let status = DirectoryStatus::Degraded {
                    reason: e.to_string(),
                };
                (Self::empty(), status, Some(e))
            }
        }
    }

    /// Case-insensitive lookup by code. Total: unknown codes yield `None`.
    pub fn lookup(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code))
    }

    /// City name for a code, or the placeholder when unset or unknown.
    pub fn label<'a>(&'a self, code: Option<&str>, placeholder: &'a str) -> &'a str {
        code.and_then(|c| self.lookup(c))
            .map(|a| a.city.as_str())
            .unwrap_or(placeholder)
    }

    /// Airports whose city, code, name or country contains `query`.
    pub fn search(&self, query: &str) -> Vec<&Airport> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.airports.iter().collect();
        }
        self.airports
            .iter()
            .filter(|a| {
                a.city.to_lowercase().contains(&needle)
                    || a.code.to_lowercase().contains(&needle)
                    || a.name.to_lowercase().contains(&needle)
                    || a.country.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}
