//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `schemelink_core` linkage.
//! - Play one caller -> callee -> caller handshake against an in-memory host.
//!
//! Output avoids printing the generated identifier so runs stay comparable.

use schemelink_core::{
    HandshakeConfig, HandshakeInitiator, HandshakeReceiver, HandshakeResult,
    InMemoryHostEnvironment, ProcessSessionState, ReturnInitiator, SchemeRegistry,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("schemelink_core ping={}", schemelink_core::ping());
    println!("schemelink_core version={}", schemelink_core::core_version());

    let config = match HandshakeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run_handshake(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("handshake error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_handshake(config: &HandshakeConfig) -> HandshakeResult<()> {
    let host = InMemoryHostEnvironment::with_schemes([
        config.caller_scheme.as_str(),
        config.callee_scheme.as_str(),
    ])?;
    let mut callee_session = ProcessSessionState::new();

    let available = SchemeRegistry::new(&host).is_available(&config.callee_scheme)?;
    println!("check scheme={} available={available}", config.callee_scheme);

    let (identifier, sent) =
        HandshakeInitiator::new(&host).invoke_with_new_identifier(&config.callee_scheme)?;
    println!("invoke dispatched={}", sent.dispatched);

    let receiver = HandshakeReceiver::new();
    for url in host.take_dispatched() {
        receiver.on_invoked_url(&mut callee_session, &url)?;
    }
    let matched = callee_session.identifier() == Some(&identifier);
    println!("receive identifier_matches={matched}");

    let returned = ReturnInitiator::new(&host).return_to_caller(&config.caller_scheme)?;
    println!("return dispatched={} url={}", returned.dispatched, returned.url);
    Ok(())
}
