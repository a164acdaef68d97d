//! Front-end errors.  The engine itself only fails on bad configuration.

use std::path::PathBuf;

use gesture_engine::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot read config file {path}: {source}")]
    ConfigFile {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    ConfigParse {
        path:   PathBuf,
        source: serde_json::Error,
    },

    #[error("MIDI channel {0} is out of range 0-15")]
    InvalidChannel(u8),

    #[error("cannot open window: {0}")]
    Window(String),
}
