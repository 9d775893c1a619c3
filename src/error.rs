use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a generation run.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode {size}x{size} icon as PNG: {source}")]
    Encode {
        size: u32,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot serialize icon manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
