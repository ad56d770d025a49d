//! Callee-side entry point for incoming invocations.
//!
//! # Invariants
//! - `on_invoked` overwrites the stored identifier unconditionally,
//!   including with an empty string when no path segment was supplied.
//! - No identifier format is enforced; any string is accepted.
//! - Repeated delivery of the same target leaves the same final state.

use crate::error::HandshakeResult;
use crate::model::identifier::SessionIdentifier;
use crate::model::session::ProcessSessionState;
use crate::model::target::InvocationTarget;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Stateless receiver writing into an explicitly passed session state.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandshakeReceiver;

impl HandshakeReceiver {
    pub fn new() -> Self {
        Self
    }

    /// Records a launch that carried no invocation target.
    ///
    /// An identifier received earlier in this process is kept.
    pub fn on_launched(&self, state: &mut ProcessSessionState) {
        debug!("event=process_launch module=handshake_receiver status=ok with_target=false");
        state.mark_launched();
    }

    /// Stores the target's path segment as the session identifier.
    pub fn on_invoked(&self, state: &mut ProcessSessionState, target: &InvocationTarget) {
        let identifier = SessionIdentifier::from(target.path_segment());
        info!(
            "event=handshake_received module=handshake_receiver status=ok scheme={} identifier_len={}",
            target.scheme(),
            identifier.as_str().len()
        );
        state.replace_identifier(identifier);
    }

    /// Parses a raw invocation string and delivers it to `on_invoked`.
    ///
    /// # Errors
    /// - Returns the parse error unchanged; `state` is left untouched.
    pub fn on_invoked_url(
        &self,
        state: &mut ProcessSessionState,
        url: &str,
    ) -> HandshakeResult<()> {
        match InvocationTarget::parse(url) {
            Ok(target) => {
                self.on_invoked(state, &target);
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=handshake_received module=handshake_receiver status=error reason=unparseable_target"
                );
                Err(err)
            }
        }
    }

    /// Returns the target's query parameters; empty when there is no query.
    pub fn parse_query_parameters(target: &InvocationTarget) -> BTreeMap<String, String> {
        target.query_parameters().clone()
    }
}
