//! Shared error type across expvar crates.

use thiserror::Error;

/// Stable error codes, suitable for logs and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A name was published twice into the same bucket.
    DuplicateName,
    /// A typed constructor found a variable of another kind under the name.
    KindMismatch,
    /// A value could not be turned into JSON.
    Serialize,
    /// Invalid configuration.
    Config,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DuplicateName => "DUPLICATE_NAME",
            ErrorKind::KindMismatch => "KIND_MISMATCH",
            ErrorKind::Serialize => "SERIALIZE",
            ErrorKind::Config => "CONFIG",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExpvarError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ExpvarError {
    #[error("reuse of exported var name: {0}")]
    DuplicateName(String),
    #[error("exported var {name} is not {expected}")]
    KindMismatch { name: String, expected: &'static str },
    #[error("serialize: {0}")]
    Serialize(String),
    #[error("float value {0} has no JSON representation")]
    NonFiniteFloat(f64),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ExpvarError {
    /// Map an error to its stable code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpvarError::DuplicateName(_) => ErrorKind::DuplicateName,
            ExpvarError::KindMismatch { .. } => ErrorKind::KindMismatch,
            ExpvarError::Serialize(_) | ExpvarError::NonFiniteFloat(_) => ErrorKind::Serialize,
            ExpvarError::Config(_) => ErrorKind::Config,
            ExpvarError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            ExpvarError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for ExpvarError {
    fn from(e: serde_json::Error) -> Self {
        ExpvarError::Serialize(e.to_string())
    }
}
