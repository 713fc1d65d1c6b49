// MIT License - Copyright (c) 2026 Peter Wright

/// All errors that can occur in the christie-lan-control library.
///
/// A projector that does not answer within the receive timeout is not an
/// error; see [`Response::NoResponse`](crate::transport::Response::NoResponse).
#[derive(Debug, thiserror::Error)]
pub enum ProjectorError {
    #[error("Connection to {address} failed: {source}")]
    Connection {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: expected a boolean, got {value:?}")]
    InvalidArgument { value: String },
}

impl ProjectorError {
    /// Whether re-invoking the same operation could succeed.
    ///
    /// Argument errors are contract violations and never are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProjectorError::Connection { .. } | ProjectorError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ProjectorError>;
