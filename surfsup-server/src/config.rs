//! API configuration - TOML file plus defaults
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:5000"
//! cors_permissive = false
//!
//! [database]
//! path = "Resources/hawaii.sqlite"
//! max_connections = 5
//!
//! [climate]
//! tobs_station = "USC00519397"
//! ```
//!
//! Every key is optional. Nothing is read from the environment.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Station reported by `/api/v1.0/tobs` unless configured otherwise.
pub const DEFAULT_TOBS_STATION: &str = "USC00519397";

const DEFAULT_DATABASE_PATH: &str = "Resources/hawaii.sqlite";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Complete configuration for one API process
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub climate: ClimateSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind: SocketAddr,

    /// Allow any CORS origin (default: false = localhost on the bind port only)
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file holding the `measurement` and `station` tables
    pub path: PathBuf,

    /// Upper bound on pooled connections, and so on concurrent sessions
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateSection {
    /// Station whose temperature observations `/api/v1.0/tobs` returns.
    ///
    /// This is a fixed id, not a computed "most active station".
    pub tobs_station: String,
}

impl Default for ClimateSection {
    fn default() -> Self {
        Self {
            tobs_station: DEFAULT_TOBS_STATION.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Load from `path` if given, else from `surfsup.toml` when it exists,
    /// else fall back to defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let local = Path::new("surfsup.toml");
                if local.exists() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate config text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                field: "database.max_connections",
                reason: "must be at least 1",
            });
        }
        if self.climate.tobs_station.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "climate.tobs_station",
                reason: "cannot be empty",
            });
        }
        Ok(())
    }
}
