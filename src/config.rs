//! File-backed settings for the command line driver.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    parser::{DEFAULT_MAX_DEPTH, FieldMap, ParserConfig},
    to_sql::{DEFAULT_TABLE, PrinterConfig},
    translate::Dialect,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// ```json
/// { "fields": { "1": "id", "2": "name" }, "table": "data", "max_depth": 256 }
/// ```
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fields: FieldMap,
    pub table: String,
    pub max_depth: usize,
    /// Render only this dialect instead of all of them.
    pub dialect: Option<Dialect>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: FieldMap::default(),
            table: DEFAULT_TABLE.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            dialect: None,
        }
    }
}

impl Config {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            max_depth: self.max_depth,
        }
    }

    pub fn printer_config(&self, dialect: Dialect) -> PrinterConfig {
        PrinterConfig {
            dialect,
            table: self.table.clone(),
        }
    }
}
