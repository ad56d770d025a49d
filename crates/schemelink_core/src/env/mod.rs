//! Host environment capability seam.
//!
//! # Responsibility
//! - Abstract the two platform primitives the handshake depends on:
//!   resolving an invocation string and dispatching it to another process.
//!
//! # Invariants
//! - `dispatch` is fire-and-forget: `true` only means the host accepted the
//!   request, never that the target process handled it.
//! - Implementations must not call back into handshake components.

mod memory;

pub use memory::InMemoryHostEnvironment;

/// Platform facility consumed by the handshake components.
pub trait HostEnvironment {
    /// Returns whether some process can handle `url`.
    fn can_resolve(&self, url: &str) -> bool;

    /// Asks the host to deliver `url`. Returns whether it was accepted.
    fn dispatch(&self, url: &str) -> bool;
}
