//! Core handshake logic for SchemeLink.
//! This crate is the single source of truth for cross-app invocation invariants.

pub mod config;
pub mod env;
pub mod error;
pub mod handshake;
pub mod logging;
pub mod model;

pub use config::{ConfigError, HandshakeConfig};
pub use env::{HostEnvironment, InMemoryHostEnvironment};
pub use error::{HandshakeError, HandshakeResult};
pub use handshake::initiator::{build_target, HandshakeInitiator};
pub use handshake::receiver::HandshakeReceiver;
pub use handshake::registry::SchemeRegistry;
pub use handshake::return_path::ReturnInitiator;
pub use handshake::InvocationResult;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::identifier::SessionIdentifier;
pub use model::session::{ProcessSessionState, SessionPhase};
pub use model::target::{is_valid_scheme, parse_query, validate_scheme, InvocationTarget};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
