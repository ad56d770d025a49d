//! Handshake data model.
//!
//! # Responsibility
//! - Define the invocation target exchanged between caller and callee.
//! - Define the opaque session identifier and per-process session state.
//!
//! # Invariants
//! - An `InvocationTarget` always carries a syntactically valid scheme.
//! - `ProcessSessionState` is mutated only by the handshake receiver.

pub mod identifier;
pub mod session;
pub mod target;
