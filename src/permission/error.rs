// Thu Jan 16 2026 - Alex

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("Invalid {name} value: {value} (expected 0-7)")]
    InvalidArgument { name: &'static str, value: u32 },
    #[error("Invalid rights string: {0:?}")]
    InvalidRights(String),
    #[error("POSIX permissions are not supported on this filesystem")]
    Unsupported,
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config error: {0}")]
    Config(String),
}

impl PermissionError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
