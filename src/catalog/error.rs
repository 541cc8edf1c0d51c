use thiserror::Error;

use super::models::TrackId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no tracks")]
    Empty,

    #[error("track id {0} appears more than once")]
    DuplicateId(TrackId),

    #[error("track {0} has no audio source")]
    MissingAudio(TrackId),
}
