//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the handshake to Dart via FRB as use-case-level functions.
//! - Own the process-wide session state and host bridge for this app.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Only `receive_invocation` writes the session identifier.
//! - Dispatched URLs queue until Dart drains them with
//!   `take_pending_dispatches` and opens them natively.

use log::warn;
use schemelink_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    HandshakeConfig, HandshakeInitiator, HandshakeReceiver, InMemoryHostEnvironment,
    InvocationResult, ProcessSessionState, ReturnInitiator, SchemeRegistry,
};
use std::sync::{Mutex, MutexGuard, OnceLock};

static RUNTIME: OnceLock<Mutex<BridgeRuntime>> = OnceLock::new();

/// Process-wide handshake context behind the FFI surface.
struct BridgeRuntime {
    config: HandshakeConfig,
    host: InMemoryHostEnvironment,
    session: ProcessSessionState,
}

impl BridgeRuntime {
    fn from_env() -> Self {
        let config = HandshakeConfig::from_env().unwrap_or_else(|err| {
            warn!("event=config_load module=ffi status=error fallback=defaults reason={err}");
            HandshakeConfig::default()
        });
        Self {
            config,
            host: InMemoryHostEnvironment::new(),
            session: ProcessSessionState::new(),
        }
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Scheme availability answer for enabling/disabling the launch action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeAvailabilityResponse {
    /// Whether the host reported the scheme as resolvable.
    pub available: bool,
    /// Empty on success; error message when the scheme is malformed.
    pub message: String,
}

/// Response envelope for dispatching and receiving handshakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Identifier sent (start) or stored (receive), when any.
    pub identifier: Option<String>,
    /// Invocation string handed to the host, when any.
    pub url: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl HandshakeActionResponse {
    fn dispatched(
        message: impl Into<String>,
        identifier: Option<String>,
        result: InvocationResult,
    ) -> Self {
        Self {
            ok: true,
            identifier,
            url: Some(result.url),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            identifier: None,
            url: None,
            message: message.into(),
        }
    }
}

/// Registers a scheme the platform confirmed it can open.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn host_register_scheme(scheme: String) -> String {
    match lock_runtime().host.register_scheme(scheme.trim()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Removes a previously registered scheme, e.g. after the target app was removed.
#[flutter_rust_bridge::frb(sync)]
pub fn host_unregister_scheme(scheme: String) -> bool {
    lock_runtime().host.unregister_scheme(scheme.trim())
}

/// Checks whether `scheme` can be invoked.
///
/// # FFI contract
/// - The answer comes from the schemes Dart registered through
///   `host_register_scheme`; Rust cannot query the platform launcher itself.
/// - Registrations are kept until `host_unregister_scheme`, so Dart must
///   re-check the platform (`canLaunchUrl`) and re-register or unregister
///   before each check for the answer to reflect installs and removals.
#[flutter_rust_bridge::frb(sync)]
pub fn is_scheme_available(scheme: String) -> SchemeAvailabilityResponse {
    let runtime = lock_runtime();
    match SchemeRegistry::new(&runtime.host).is_available(scheme.as_str()) {
        Ok(available) => SchemeAvailabilityResponse {
            available,
            message: String::new(),
        },
        Err(err) => SchemeAvailabilityResponse {
            available: false,
            message: err.to_string(),
        },
    }
}

/// Starts a handshake with the configured callee using a fresh identifier.
///
/// # FFI contract
/// - Never panics.
/// - `ok=false` leaves session state and host queue unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn start_handshake() -> HandshakeActionResponse {
    let runtime = lock_runtime();
    let initiator = HandshakeInitiator::new(&runtime.host);
    let outcome = initiator
        .invoke_with_new_identifier(&runtime.config.callee_scheme)
        .and_then(|(identifier, result)| Ok((identifier, result.ensure_dispatched()?)));
    match outcome {
        Ok((identifier, result)) => HandshakeActionResponse::dispatched(
            "Handshake dispatched.",
            Some(identifier.into_inner()),
            result,
        ),
        Err(err) => HandshakeActionResponse::failure(format!("start_handshake failed: {err}")),
    }
}

/// Returns control to the configured caller without payload.
#[flutter_rust_bridge::frb(sync)]
pub fn return_to_caller() -> HandshakeActionResponse {
    let runtime = lock_runtime();
    let outcome = ReturnInitiator::new(&runtime.host)
        .return_to_caller(&runtime.config.caller_scheme)
        .and_then(InvocationResult::ensure_dispatched);
    match outcome {
        Ok(result) => HandshakeActionResponse::dispatched("Returned to caller.", None, result),
        Err(err) => HandshakeActionResponse::failure(format!("return_to_caller failed: {err}")),
    }
}

/// Entry point for an incoming invocation URL (cold launch or reuse).
///
/// Pass `None` when the process launched without an invocation URL.
///
/// # FFI contract
/// - Call exactly once per incoming invocation.
/// - Malformed URLs leave the stored identifier unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn receive_invocation(url: Option<String>) -> HandshakeActionResponse {
    let mut runtime = lock_runtime();
    let receiver = HandshakeReceiver::new();
    let Some(url) = url else {
        receiver.on_launched(&mut runtime.session);
        return HandshakeActionResponse {
            ok: true,
            identifier: runtime.session.identifier().map(|id| id.to_string()),
            url: None,
            message: "Launched without invocation.".to_string(),
        };
    };

    match receiver.on_invoked_url(&mut runtime.session, url.trim()) {
        Ok(()) => HandshakeActionResponse {
            ok: true,
            identifier: Some(runtime.session.identifier_str().to_string()),
            url: Some(url),
            message: "Invocation received.".to_string(),
        },
        Err(err) => HandshakeActionResponse::failure(format!("receive_invocation failed: {err}")),
    }
}

/// Returns the last received identifier; empty when none was received.
#[flutter_rust_bridge::frb(sync)]
pub fn session_identifier() -> String {
    lock_runtime().session.identifier_str().to_string()
}

/// Drains dispatched URLs for Dart to open with the platform launcher.
#[flutter_rust_bridge::frb(sync)]
pub fn take_pending_dispatches() -> Vec<String> {
    lock_runtime().host.take_dispatched()
}

fn lock_runtime() -> MutexGuard<'static, BridgeRuntime> {
    RUNTIME
        .get_or_init(|| Mutex::new(BridgeRuntime::from_env()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
