//! Per-process session state written by the handshake receiver.
//!
//! # Invariants
//! - Starts in `SessionPhase::NotLaunched` with no identifier.
//! - Only the receiver mutates it; every invocation overwrites the
//!   identifier, there is no queue of pending invocations.
//! - Never cleared; it ends with the owning process.

use crate::model::identifier::SessionIdentifier;
use serde::{Deserialize, Serialize};

/// Launch lifecycle of the owning process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Process state exists but no launch has been observed yet.
    #[default]
    NotLaunched,
    /// Process was launched, with or without an invocation target.
    Launched,
}

/// Last identifier received by this process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSessionState {
    phase: SessionPhase,
    identifier: Option<SessionIdentifier>,
}

impl ProcessSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns `None` until the first invocation has been received.
    pub fn identifier(&self) -> Option<&SessionIdentifier> {
        self.identifier.as_ref()
    }

    /// Display form used by UI collaborators; empty when unset.
    pub fn identifier_str(&self) -> &str {
        self.identifier
            .as_ref()
            .map(SessionIdentifier::as_str)
            .unwrap_or("")
    }

    pub(crate) fn mark_launched(&mut self) {
        self.phase = SessionPhase::Launched;
    }

    pub(crate) fn replace_identifier(&mut self, identifier: SessionIdentifier) {
        self.phase = SessionPhase::Launched;
        self.identifier = Some(identifier);
    }
}
