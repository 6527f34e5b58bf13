//! Crate error type.
//!
//! Only configuration and scenario loading can fail. The per-frame drawing path
//! never returns errors; it degrades to placeholders instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WildlifeError {
    #[error("failed to load config file {path:?}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("failed to save config file {path:?}: {source}")]
    ConfigSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },

    #[error("failed to read scenario {path:?}: {source}")]
    ScenarioIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario {path:?}: {source}")]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, WildlifeError>;
