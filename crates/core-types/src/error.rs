// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Series are misaligned: {reason}")]
    MisalignedSeries { reason: String },

    #[error("Insufficient data: {required} observations required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("Timestamps must be strictly increasing (violated at index {index})")]
    UnorderedTimestamps { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
