use schemelink_core::{
    HandshakeConfig, HandshakeError, HandshakeInitiator, HandshakeReceiver, InMemoryHostEnvironment,
    InvocationTarget, ProcessSessionState, ReturnInitiator, SchemeRegistry, SessionPhase,
};

const SAMPLE_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";

/// Delivers every URL the caller dispatched to the callee's receiver.
fn deliver_all(host: &InMemoryHostEnvironment, callee_state: &mut ProcessSessionState) {
    let receiver = HandshakeReceiver::new();
    for url in host.take_dispatched() {
        receiver
            .on_invoked_url(callee_state, &url)
            .expect("dispatched url should parse");
    }
}

#[test]
fn caller_hands_identifier_to_running_callee() {
    let host = InMemoryHostEnvironment::with_schemes(["app1", "app2"]).expect("valid schemes");
    let mut callee_state = ProcessSessionState::new();

    assert!(SchemeRegistry::new(&host)
        .is_available("app2")
        .expect("valid scheme"));

    let result = HandshakeInitiator::new(&host)
        .invoke("app2", Some(SAMPLE_UUID))
        .expect("target should build");
    assert!(result.dispatched);

    deliver_all(&host, &mut callee_state);
    assert_eq!(callee_state.phase(), SessionPhase::Launched);
    assert_eq!(callee_state.identifier_str(), SAMPLE_UUID);
}

#[test]
fn unregistered_callee_is_reported_unavailable() {
    let host = InMemoryHostEnvironment::with_schemes(["app1"]).expect("valid schemes");
    let available = SchemeRegistry::new(&host)
        .is_available("app2")
        .expect("valid scheme must not fail");
    assert!(!available);
}

#[test]
fn malformed_schemes_never_reach_the_host() {
    let host = InMemoryHostEnvironment::with_schemes(["app2"]).expect("valid schemes");
    let registry = SchemeRegistry::new(&host);
    for scheme in ["", "app2://x", "app 2", "app2\n"] {
        assert!(matches!(
            registry.is_available(scheme),
            Err(HandshakeError::InvalidScheme(_))
        ));
    }
    assert!(host.resolve_queries().is_empty());
}

#[test]
fn return_to_caller_changes_no_session_state() {
    let host = InMemoryHostEnvironment::with_schemes(["app1", "app2"]).expect("valid schemes");
    let mut callee_state = ProcessSessionState::new();
    HandshakeReceiver::new()
        .on_invoked_url(&mut callee_state, &format!("app2:///{SAMPLE_UUID}"))
        .expect("valid url");
    let before = callee_state.clone();

    let result = ReturnInitiator::new(&host)
        .return_to_caller("app1")
        .expect("valid caller scheme")
        .ensure_dispatched()
        .expect("app1 is registered");
    assert_eq!(result.url, "app1://");
    assert_eq!(host.dispatched(), vec!["app1://"]);
    assert_eq!(callee_state, before);
}

#[test]
fn identifier_round_trips_for_unreserved_characters() {
    let receiver = HandshakeReceiver::new();
    for identifier in [SAMPLE_UUID, "abc", "A-b_c.d~e", "0123456789"] {
        let target = schemelink_core::build_target("app2", Some(identifier)).expect("valid target");
        let parsed = InvocationTarget::parse(&target.to_url().expect("serialize"))
            .expect("serialized target should parse");

        let mut state = ProcessSessionState::new();
        receiver.on_invoked(&mut state, &parsed);
        assert_eq!(state.identifier_str(), identifier);
    }
}

#[test]
fn repeated_delivery_is_idempotent() {
    let target = InvocationTarget::parse(&format!("app2:///{SAMPLE_UUID}")).expect("parse");
    let receiver = HandshakeReceiver::new();

    let mut once = ProcessSessionState::new();
    receiver.on_invoked(&mut once, &target);

    let mut twice = ProcessSessionState::new();
    receiver.on_invoked(&mut twice, &target);
    receiver.on_invoked(&mut twice, &target);

    assert_eq!(once, twice);
}

#[test]
fn latest_invocation_wins_on_process_reuse() {
    let host = InMemoryHostEnvironment::with_schemes(["app2"]).expect("valid schemes");
    let initiator = HandshakeInitiator::new(&host);
    let (first, _) = initiator
        .invoke_with_new_identifier("app2")
        .expect("first invoke");
    let (second, _) = initiator
        .invoke_with_new_identifier("app2")
        .expect("second invoke");
    assert_ne!(first, second);

    let mut callee_state = ProcessSessionState::new();
    deliver_all(&host, &mut callee_state);
    assert_eq!(callee_state.identifier(), Some(&second));
}

#[test]
fn declined_dispatch_is_a_typed_no_op() {
    let host = InMemoryHostEnvironment::new();
    let err = HandshakeInitiator::new(&host)
        .invoke("app2", Some(SAMPLE_UUID))
        .expect("target should build")
        .ensure_dispatched()
        .expect_err("unregistered scheme must be rejected");
    assert!(matches!(err, HandshakeError::DispatchRejected { .. }));
    assert!(host.dispatched().is_empty());
}

#[test]
fn configured_schemes_drive_full_round_trip() {
    let config = HandshakeConfig::default();
    let host = InMemoryHostEnvironment::with_schemes([
        config.caller_scheme.as_str(),
        config.callee_scheme.as_str(),
    ])
    .expect("default schemes are valid");
    let mut callee_state = ProcessSessionState::new();

    let (identifier, _) = HandshakeInitiator::new(&host)
        .invoke_with_new_identifier(&config.callee_scheme)
        .expect("invoke callee");
    deliver_all(&host, &mut callee_state);
    assert_eq!(callee_state.identifier(), Some(&identifier));

    ReturnInitiator::new(&host)
        .return_to_caller(&config.caller_scheme)
        .expect("return to caller");
    assert_eq!(host.take_dispatched(), vec!["app1://"]);
}
