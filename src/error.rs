use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while loading topologies, rendering and deploying configs
#[derive(Error, Debug)]
pub enum NetfusionError {
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to parse topology {}: {message}", path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("device '{device}' is missing required field '{field}'")]
    MissingField { device: String, field: String },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("refusing to deploy {} onto itself ({})", src.display(), dest.display())]
    SameFile { src: PathBuf, dest: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NetfusionError {
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn missing_field(device: &str, field: &str) -> Self {
        Self::MissingField {
            device: device.to_string(),
            field: field.to_string(),
        }
    }

    /// Wrap an I/O error, mapping `ErrorKind::NotFound` to [`NetfusionError::NotFound`]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Io { path, source }
    }
}

pub type Result<T> = std::result::Result<T, NetfusionError>;
