use thiserror::Error;

use crate::timeline::SegmentId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("segment not found: {0}")]
    SegmentNotFound(SegmentId),

    #[error("track not found: {0}")]
    TrackNotFound(usize),

    #[error("invalid interaction state: {0}")]
    InvalidState(&'static str),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
