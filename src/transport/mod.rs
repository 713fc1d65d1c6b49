// MIT License - Copyright (c) 2026 Peter Wright

pub mod direct;

use std::fmt;

use crate::constants::NOT_RESPONDING;
use crate::error::Result;

pub use direct::{Connection, DirectTcpTransport};

/// Outcome of a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Decoded reply text, exactly as received.
    Text(String),
    /// Nothing arrived before the receive timeout, or no reply was requested.
    NoResponse,
}

impl Response {
    pub fn text(&self) -> Option<&str> {
        match self {
            Response::Text(text) => Some(text),
            Response::NoResponse => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Response::Text(text) => Some(text),
            Response::NoResponse => None,
        }
    }

    pub fn is_no_response(&self) -> bool {
        matches!(self, Response::NoResponse)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Text(text) => f.write_str(text),
            Response::NoResponse => f.write_str(NOT_RESPONDING),
        }
    }
}

/// One complete request/response cycle over a fresh connection.
///
/// Implementations open a connection, write `command`, read at most
/// `max_response_bytes` bytes, and close the connection on every path.
/// A timeout is reported as [`Response::NoResponse`], never as an error.
/// With `max_response_bytes == 0` nothing is read.
pub trait Transport {
    fn transact(&self, command: &str, max_response_bytes: usize) -> Result<Response>;
}
