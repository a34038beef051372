//! Configuration management for flight-report.
//!
//! Handles loading configuration from a TOML file, with the database URL
//! overridable from the command line or the `FLIGHTS_DATABASE_URL` variable.

use crate::error::{FlightError, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default location of the flights database, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/flights.sqlite3";

/// Main configuration structure for flight-report.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    /// Database URL or path.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-query timeout in seconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,

    /// How long SQLite waits on a locked database file, in seconds.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_query_timeout() -> u64 {
    30
}

fn default_busy_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            query_timeout_secs: default_query_timeout(),
            busy_timeout_secs: default_busy_timeout(),
        }
    }
}

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// Private in-memory database.
    Memory,
    /// Database file on disk.
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parses a database URL.
    ///
    /// Accepts `sqlite:///relative`, `sqlite:////absolute` (SQLAlchemy form),
    /// `sqlite://path`, `sqlite:path`, `sqlite::memory:` and bare paths.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(FlightError::config("Database URL is empty"));
        }

        if url == "sqlite::memory:" || url == ":memory:" {
            return Ok(Self::Memory);
        }

        let path = if let Some(rest) = url.strip_prefix("sqlite:///") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = url.strip_prefix("sqlite:") {
            rest
        } else if let Some((scheme, _)) = url.split_once("://") {
            return Err(FlightError::config(format!(
                "Invalid scheme '{scheme}'. Expected 'sqlite'"
            )));
        } else {
            url
        };

        // Drop connection-string options such as `?mode=ro`.
        let path = path.split('?').next().unwrap_or_default();
        if path.is_empty() {
            return Err(FlightError::config(format!(
                "Database URL '{url}' does not name a file"
            )));
        }

        Ok(Self::File(PathBuf::from(path)))
    }
}

impl DatabaseConfig {
    /// Creates a config for the given URL with default timeouts.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Parses the URL into a database location.
    pub fn location(&self) -> Result<DatabaseLocation> {
        DatabaseLocation::parse(&self.url)
    }

    /// Rejects settings no store could run with.
    pub fn validate(&self) -> Result<()> {
        if self.query_timeout_secs == 0 {
            return Err(FlightError::config(
                "query_timeout_secs must be at least 1",
            ));
        }
        self.location().map(|_| ())
    }

    /// Per-query timeout.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Builds sqlx connect options. File databases are opened read-only and
    /// never created, so a wrong path fails instead of producing an empty file.
    pub fn connect_options(&self) -> Result<SqliteConnectOptions> {
        self.validate()?;
        let options = match self.location()? {
            DatabaseLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| FlightError::config(format!("Invalid database URL: {e}")))?,
            DatabaseLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .read_only(true)
                .create_if_missing(false),
        };

        Ok(options.busy_timeout(Duration::from_secs(self.busy_timeout_secs)))
    }

    /// Returns a short description of the database for log lines.
    pub fn display_string(&self) -> String {
        match self.location() {
            Ok(DatabaseLocation::Memory) => "in-memory database".to_string(),
            Ok(DatabaseLocation::File(path)) => path.display().to_string(),
            Err(_) => self.url.clone(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flight-report")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| FlightError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            FlightError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;

        if config.database.query_timeout_secs == 0 {
            return Err(FlightError::config(format!(
                "Configuration error in {}:\n  query_timeout_secs must be at least 1",
                path.display()
            )));
        }
        Ok(config)
    }

    /// Returns the database settings with the URL override applied, if any.
    pub fn database_with_override(&self, url: Option<&str>) -> DatabaseConfig {
        let mut database = self.database.clone();
        if let Some(url) = url {
            database.url = url.to_string();
        }
        database
    }
}
