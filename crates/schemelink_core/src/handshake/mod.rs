//! Cross-process handshake components.
//!
//! # Responsibility
//! - `SchemeRegistry`: answer "can this process invoke scheme X?".
//! - `HandshakeInitiator`: build and dispatch an identifier-carrying target.
//! - `HandshakeReceiver`: record the identifier a process was launched with.
//! - `ReturnInitiator`: resume the caller without payload.
//!
//! # Invariants
//! - All components run on one serial sequencing context; none of them
//!   retries, caches or blocks.
//! - A failed precondition never reaches the host environment.

pub mod initiator;
pub mod receiver;
pub mod registry;
pub mod return_path;

use crate::env::HostEnvironment;
use crate::error::{HandshakeError, HandshakeResult};
use crate::model::target::InvocationTarget;
use log::{info, warn};
use serde::Serialize;

/// Outcome of one dispatch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    /// `true` only if the host accepted the request.
    pub dispatched: bool,
    /// Serialized invocation string handed to the host.
    pub url: String,
}

impl InvocationResult {
    /// Converts a declined dispatch into `HandshakeError::DispatchRejected`.
    pub fn ensure_dispatched(self) -> HandshakeResult<Self> {
        if self.dispatched {
            Ok(self)
        } else {
            Err(HandshakeError::DispatchRejected { url: self.url })
        }
    }
}

/// Serializes `target` and hands it to the host exactly once.
pub(crate) fn dispatch_target<E: HostEnvironment + ?Sized>(
    env: &E,
    target: &InvocationTarget,
    module: &'static str,
) -> HandshakeResult<InvocationResult> {
    let url = match target.to_url() {
        Ok(url) => url,
        Err(err) => {
            warn!(
                "event=handshake_dispatch module={} status=error scheme={} reason=invalid_target",
                module,
                target.scheme()
            );
            return Err(err);
        }
    };

    let dispatched = env.dispatch(&url);
    if dispatched {
        info!(
            "event=handshake_dispatch module={} status=ok scheme={} payload_len={}",
            module,
            target.scheme(),
            target.path_segment().len()
        );
    } else {
        warn!(
            "event=handshake_dispatch module={} status=rejected scheme={}",
            module,
            target.scheme()
        );
    }
    Ok(InvocationResult { dispatched, url })
}

#[cfg(test)]
mod tests {
    use super::InvocationResult;
    use crate::error::HandshakeError;

    #[test]
    fn ensure_dispatched_passes_accepted_result_through() {
        let result = InvocationResult {
            dispatched: true,
            url: "app2://".to_string(),
        };
        assert_eq!(result.clone().ensure_dispatched(), Ok(result));
    }

    #[test]
    fn ensure_dispatched_reports_rejection() {
        let err = InvocationResult {
            dispatched: false,
            url: "app2://".to_string(),
        }
        .ensure_dispatched()
        .expect_err("declined dispatch must fail");
        assert_eq!(
            err,
            HandshakeError::DispatchRejected {
                url: "app2://".to_string()
            }
        );
    }
}
