//! Handshake error taxonomy.
//!
//! # Invariants
//! - Every variant is a local, recoverable condition. Callers skip the
//!   dispatch and leave UI/session state unchanged.
//! - `InvalidScheme` is raised before any host environment call.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HandshakeResult<T> = Result<T, HandshakeError>;

/// Failure conditions for scheme probing, target construction and dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeError {
    /// Scheme string does not match `[a-z][a-z0-9+.-]*`.
    InvalidScheme(String),
    /// Target cannot be serialized into (or parsed from) an invocation string.
    InvalidTarget(String),
    /// Host environment declined to dispatch the invocation.
    DispatchRejected { url: String },
}

impl Display for HandshakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidScheme(value) => write!(f, "invalid scheme: `{value}`"),
            Self::InvalidTarget(message) => write!(f, "invalid invocation target: {message}"),
            Self::DispatchRejected { url } => {
                write!(f, "host environment rejected dispatch of `{url}`")
            }
        }
    }
}

impl Error for HandshakeError {}
