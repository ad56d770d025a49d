//! Caller-side handshake initiation.
//!
//! # Invariants
//! - At most one dispatch per `invoke` call; nothing is retried.
//! - The identifier is placed verbatim in the path segment, producing the
//!   `scheme:///<identifier>` shape.

use crate::env::HostEnvironment;
use crate::error::HandshakeResult;
use crate::handshake::{dispatch_target, InvocationResult};
use crate::model::identifier::SessionIdentifier;
use crate::model::target::InvocationTarget;

const MODULE: &str = "handshake_initiator";

/// Builds the target for one handshake without dispatching it.
///
/// `None` (or an empty identifier) yields the bare `scheme://` shape.
pub fn build_target(scheme: &str, identifier: Option<&str>) -> HandshakeResult<InvocationTarget> {
    let target = InvocationTarget::new(scheme)?;
    Ok(match identifier {
        Some(identifier) => target.with_path_segment(identifier),
        None => target,
    })
}

pub struct HandshakeInitiator<'env, E: HostEnvironment + ?Sized> {
    env: &'env E,
}

impl<'env, E: HostEnvironment + ?Sized> HandshakeInitiator<'env, E> {
    pub fn new(env: &'env E) -> Self {
        Self { env }
    }

    /// Builds a target for `scheme` and asks the host to dispatch it.
    ///
    /// # Errors
    /// - `InvalidScheme` for a malformed scheme.
    /// - `InvalidTarget` when `identifier` breaks URL construction. No
    ///   dispatch is attempted in either case.
    pub fn invoke(
        &self,
        scheme: &str,
        identifier: Option<&str>,
    ) -> HandshakeResult<InvocationResult> {
        let target = build_target(scheme, identifier)?;
        dispatch_target(self.env, &target, MODULE)
    }

    /// Generates a fresh identifier and invokes `scheme` with it.
    pub fn invoke_with_new_identifier(
        &self,
        scheme: &str,
    ) -> HandshakeResult<(SessionIdentifier, InvocationResult)> {
        let identifier = SessionIdentifier::generate();
        let result = self.invoke(scheme, Some(identifier.as_str()))?;
        Ok((identifier, result))
    }
}
