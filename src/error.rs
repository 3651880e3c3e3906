use thiserror::Error;

use crate::nn::unit_id::UnitId;

/// Result type for every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, RangerError>;

/// Errors surfaced by the vector algebra and the network core.
#[derive(Debug, Error)]
pub enum RangerError {
    #[error("dimension mismatch: left has size {left}, right has size {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("missing connection for unit {0}")]
    MissingConnection(UnitId),

    #[error("vector of size {0} is not a scalar")]
    NotScalar(usize),

    #[error("malformed serialized form: {0}")]
    MalformedSerializedForm(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("cannot encode as JSON: {0}")]
    Unencodable(String),

    #[error("{what} of {value} exceeds the limit of {max}")]
    LimitExceeded {
        what: &'static str,
        value: usize,
        max: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for RangerError {
    fn from(err: serde_json::Error) -> Self {
        RangerError::MalformedSerializedForm(err.to_string())
    }
}

/// Classifies a serde_json failure raised while writing: IO stays IO,
/// anything else (a non-finite float) is `Unencodable`.
pub(crate) fn encode_error(err: serde_json::Error) -> RangerError {
    if err.is_io() {
        RangerError::Io(err.into())
    } else {
        RangerError::Unencodable(err.to_string())
    }
}

/// Fails with `LimitExceeded` when `value > max`.
pub(crate) fn check_limit(what: &'static str, value: usize, max: usize) -> Result<()> {
    if value > max {
        Err(RangerError::LimitExceeded { what, value, max })
    } else {
        Ok(())
    }
}

/// Fails with `DimensionMismatch` unless both sizes agree.
pub(crate) fn check_dims(left: usize, right: usize) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(RangerError::DimensionMismatch { left, right })
    }
}
