//! Central error type for the pointing experiment.

use thiserror::Error;

/// Errors raised while configuring or running an experiment.
#[derive(Error, Debug)]
pub enum ExperimentError {
    /// A selector, setup file or layout request was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A `(x,y)` entry in a setup file could not be parsed.
    #[error("Malformed coordinate '{0}'")]
    MalformedCoordinate(String),

    /// The layout generator ran out of attempts.
    #[error("Could only place {placed} of {requested} targets without overlap")]
    LayoutExhausted { placed: usize, requested: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HOME env var not set")]
    NoHomeDir,
}

pub type Result<T> = std::result::Result<T, ExperimentError>;
