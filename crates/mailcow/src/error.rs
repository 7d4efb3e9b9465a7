//! Error types for the reconciliation engine

use std::fmt;

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between a desired configuration and the
/// Mailcow API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Connection, DNS or I/O failure before a response was received
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with an HTTP status other than 200
    #[error("status: {code}, body: {body}")]
    Status { code: u16, body: String },

    /// A request body could not be serialized
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// A response body (envelope or entity) could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// The outcome envelope reported a non-success entry
    #[error("{0}")]
    Rejected(String),

    /// Host or API key missing or empty
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operation invoked in a state that does not allow it
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Required attribute is null
    #[error("missing required attribute: {0}")]
    MissingAttribute(&'static str),

    /// Attribute value is not known yet at apply time
    #[error("attribute {0} is not known yet")]
    UnresolvedAttribute(&'static str),

    #[error(
        "invalid list length for {attribute}: list length must be greater than 0, got: {count}"
    )]
    InvalidListLength { attribute: &'static str, count: usize },

    #[error("invalid import key {key:?}: {reason}")]
    InvalidImportKey { key: String, reason: String },
}

/// Lifecycle operation names, carried by [`OperationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Plan,
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Plan => "plan",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`Error`] tagged with the resource type and operation that raised it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{resource} {operation}: {source}")]
pub struct OperationError {
    pub resource: &'static str,
    pub operation: Operation,
    pub source: Error,
}

impl OperationError {
    pub fn new(resource: &'static str, operation: Operation, source: Error) -> Self {
        Self {
            resource,
            operation,
            source,
        }
    }

    /// The underlying error
    pub fn kind(&self) -> &Error {
        &self.source
    }
}
