//! Configuration for the kanban store using Figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values (hardcoded)
//! 2. `kanban.toml` / `kanban.yaml` / `kanban.json` in the working directory,
//!    or one explicit file
//! 3. Environment variables with the `KANBAN_` prefix (`KANBAN_DATABASE`,
//!    `KANBAN_BUSY_TIMEOUT_MS`, ...)

use crate::error::{KanbanError, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default database filename
pub const DEFAULT_DB_FILENAME: &str = "kanban.db";

/// Config file stems probed in the working directory
const CONFIG_FILE_STEM: &str = "kanban";

/// Environment variable prefix
const ENV_PREFIX: &str = "KANBAN_";

/// Settings for the store and board defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    /// Path of the SQLite database file
    pub database: PathBuf,
    /// How long a transaction waits for another writer before failing
    pub busy_timeout_ms: u64,
    /// SQLite journal mode; WAL lets readers proceed while one writer commits
    pub journal_mode: String,
    /// Default lifetime of a board invite
    pub invite_ttl_hours: i64,
    /// Columns created with every new board, in order
    pub default_columns: Vec<String>,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DB_FILENAME),
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            invite_ttl_hours: 48,
            default_columns: vec![
                "To Do".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
        }
    }
}

impl KanbanConfig {
    /// Defaults, pointed at a specific database file
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        Self {
            database: path.into(),
            ..Self::default()
        }
    }

    /// Load from defaults, discovered config files and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load, reading `file` instead of probing the working directory
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let config: KanbanConfig = Self::figment(file).extract()?;
        config.validate()?;
        debug!(database = %config.database.display(), "loaded kanban config");
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(KanbanConfig::default()));

        match file {
            Some(path) => {
                figment = match path.extension().and_then(|e| e.to_str()) {
                    Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                    Some("json") => figment.merge(Json::file(path)),
                    _ => figment.merge(Toml::file(path)),
                };
            }
            None => {
                figment = figment
                    .merge(Toml::file(format!("{CONFIG_FILE_STEM}.toml")))
                    .merge(Yaml::file(format!("{CONFIG_FILE_STEM}.yaml")))
                    .merge(Json::file(format!("{CONFIG_FILE_STEM}.json")));
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Busy timeout as a Duration
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            return Err(KanbanError::validation("database", "path must not be empty"));
        }
        if self.invite_ttl_hours <= 0 {
            return Err(KanbanError::validation(
                "invite_ttl_hours",
                "must be positive",
            ));
        }
        if self.default_columns.iter().any(|c| c.trim().is_empty()) {
            return Err(KanbanError::validation(
                "default_columns",
                "column names must not be blank",
            ));
        }
        Ok(())
    }
}
