//! Configuration loading traits and types.
//!
//! Board topologies (how many joints, motors, controllers, ... each board
//! carries) are normally supplied by per-robot configuration tables. This
//! module reads them from a TOML file so that the topology registry can be
//! populated at start-up.
//!
//! # Usage
//!
//! ```rust,no_run
//! use motnet_common::config::{ConfigError, ConfigLoader, NodeConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = NodeConfig::load(Path::new("boards.toml"))?;
//!     config.validate()?;
//!     println!("{} boards", config.boards.len());
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::consts::{MAX_BOARDS, MAX_ENTITY_KINDS};
use crate::endpoint::Endpoint;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// One row of the board configuration table.
///
/// # TOML Example
///
/// ```toml
/// [[boards]]
/// board = 0
/// name = "upper-arm"
/// endpoint = "motion_control"
/// entities = [4, 2, 1]   # joints, motors, controllers
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board id (`0..MAX_BOARDS`).
    pub board: u8,

    /// Human readable board label.
    #[serde(default)]
    pub name: String,

    /// Endpoint the counts refer to.
    pub endpoint: Endpoint,

    /// Number of entities of each kind, in the endpoint's entity order.
    pub entities: Vec<u8>,
}

/// Top-level node configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Instance identifier used in logs.
    pub node_name: String,

    /// Board topology table.
    #[serde(default)]
    pub boards: Vec<BoardConfig>,
}

impl NodeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `node_name` is empty
    /// - a board id is `>= MAX_BOARDS`
    /// - a count vector has more than `MAX_ENTITY_KINDS` entries
    /// - the same `(board, endpoint)` pair appears twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "node_name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.boards {
            if entry.board as usize >= MAX_BOARDS {
                return Err(ConfigError::ValidationError(format!(
                    "board {} out of range (max {})",
                    entry.board,
                    MAX_BOARDS - 1
                )));
            }
            if entry.entities.len() > MAX_ENTITY_KINDS {
                return Err(ConfigError::ValidationError(format!(
                    "board {} lists {} entity kinds (max {MAX_ENTITY_KINDS})",
                    entry.board,
                    entry.entities.len()
                )));
            }
            if !seen.insert((entry.board, entry.endpoint)) {
                return Err(ConfigError::ValidationError(format!(
                    "board {} has more than one '{}' entry",
                    entry.board, entry.endpoint
                )));
            }
        }
        Ok(())
    }

    /// Iterate over the table rows of one endpoint.
    pub fn boards_for(&self, endpoint: Endpoint) -> impl Iterator<Item = &BoardConfig> {
        self.boards.iter().filter(move |b| b.endpoint == endpoint)
    }
}

/// Trait for loading configuration from TOML files.
///
/// Blanket-implemented for every `serde::de::DeserializeOwned` type.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
node_name = "left-arm"
log_level = "debug"

[[boards]]
board = 0
name = "upper-arm"
endpoint = "motion_control"
entities = [4, 2, 0]

[[boards]]
board = 0
endpoint = "analog_sensors"
entities = [1, 0]

[[boards]]
board = 3
endpoint = "motion_control"
entities = [2, 2, 1]
"#;

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_into_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
    }

    #[test]
    fn test_parse_sample() {
        let config = NodeConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.node_name, "left-arm");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.boards.len(), 3);
        assert_eq!(config.boards[0].entities, vec![4, 2, 0]);
        assert_eq!(config.boards[1].endpoint, Endpoint::AnalogSensors);
        assert!(config.boards[1].name.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_boards_for_filters_endpoint() {
        let config = NodeConfig::from_toml_str(SAMPLE).unwrap();
        let mc: Vec<u8> = config
            .boards_for(Endpoint::MotionControl)
            .map(|b| b.board)
            .collect();
        assert_eq!(mc, vec![0, 3]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = NodeConfig::load(file.path()).unwrap();
        assert_eq!(config.boards.len(), 3);
    }

    #[test]
    fn test_file_not_found() {
        let result = NodeConfig::load(Path::new("/nonexistent/boards.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_parse_error() {
        let result = NodeConfig::from_toml_str("node_name = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let config = NodeConfig {
            log_level: LogLevel::Info,
            node_name: String::new(),
            boards: vec![],
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_board_out_of_range() {
        let config = NodeConfig {
            log_level: LogLevel::Info,
            node_name: "n".to_string(),
            boards: vec![BoardConfig {
                board: MAX_BOARDS as u8,
                name: String::new(),
                endpoint: Endpoint::MotionControl,
                entities: vec![1],
            }],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_kinds() {
        let config = NodeConfig {
            log_level: LogLevel::Info,
            node_name: "n".to_string(),
            boards: vec![BoardConfig {
                board: 1,
                name: String::new(),
                endpoint: Endpoint::MotionControl,
                entities: vec![1; MAX_ENTITY_KINDS + 1],
            }],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_board_endpoint() {
        let entry = BoardConfig {
            board: 2,
            name: String::new(),
            endpoint: Endpoint::MotionControl,
            entities: vec![1, 1, 1],
        };
        let config = NodeConfig {
            log_level: LogLevel::Info,
            node_name: "n".to_string(),
            boards: vec![entry.clone(), entry],
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("board 2"));
    }
}
