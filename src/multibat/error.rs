use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MultibatError {
    #[error("Invalid frame range: {0}")]
    InvalidRange(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Invalid package layout: {0}")]
    InvalidLayout(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl MultibatError {
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MultibatError::WriteFile {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MultibatError>;
