use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Unsupported format {extension:?} for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode overlay: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
