use std::path::PathBuf;

use thiserror::Error;

use crate::booth::BoothId;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("no booth with id {0}")]
    UnknownBooth(BoothId),
    #[error("booth {0} has no area to draw on the plan")]
    Unbound(BoothId),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid booth data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode plan image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EditorError>;
