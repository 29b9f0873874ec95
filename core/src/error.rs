use thiserror::Error;

/// Failures raised by the index, the query parser and the paginator.
///
/// Every variant is produced synchronously at the offending call; a failed
/// `add_document` leaves the index untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Malformed constructor or helper input, e.g. a stop word with control characters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("document {id} rejected: {reason}")]
    InvalidDocument { id: i32, reason: String },
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("position {position} is out of range for {count} documents")]
    OutOfRange { position: usize, count: usize },
    #[error("document {0} not found")]
    NotFound(i32),
}

pub type Result<T> = std::result::Result<T, SearchError>;
