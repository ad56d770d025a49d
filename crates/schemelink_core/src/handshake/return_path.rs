//! Callee-side return navigation.

use crate::env::HostEnvironment;
use crate::error::HandshakeResult;
use crate::handshake::{dispatch_target, InvocationResult};
use crate::model::target::InvocationTarget;

const MODULE: &str = "return_initiator";

/// Resumes the caller with a payload-free `scheme://` target.
pub struct ReturnInitiator<'env, E: HostEnvironment + ?Sized> {
    env: &'env E,
}

impl<'env, E: HostEnvironment + ?Sized> ReturnInitiator<'env, E> {
    pub fn new(env: &'env E) -> Self {
        Self { env }
    }

    /// # Errors
    /// - `InvalidScheme` when `caller_scheme` is malformed; nothing is dispatched.
    pub fn return_to_caller(&self, caller_scheme: &str) -> HandshakeResult<InvocationResult> {
        let target = InvocationTarget::new(caller_scheme)?;
        dispatch_target(self.env, &target, MODULE)
    }
}
