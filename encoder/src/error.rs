//! Library error types

use thiserror::Error;

pub use crate::utils::decode::DecodeError;

/// Error returned by the encode step.
///
/// Flattening itself is total; only rendering the records can fail.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
