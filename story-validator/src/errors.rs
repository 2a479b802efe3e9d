use thiserror::Error;

/// Construction-time failures of the validator.
///
/// Validation itself never fails: once a [`crate::Validator`] exists every
/// problem with a candidate source is reported as a diagnostic or verdict.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serde json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("invalid blacklist pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    #[error("unknown file kind: {0}")]
    UnknownFileKind(String),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
