//! Error types for the preference tree.

/// Errors raised by preference tree operations.
///
/// Entry reads and writes are total; the only checked failure is a malformed
/// node name or path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid node name '{name}': {message}")]
    InvalidName { name: String, message: String },
}

impl Error {
    pub(crate) fn invalid_name(name: &str, message: impl Into<String>) -> Self {
        Error::InvalidName {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

/// A partition label that is neither `user` nor `system`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown partition '{0}', expected 'user' or 'system'")]
pub struct UnknownPartition(pub String);
