//! Scheme availability check.

use crate::env::HostEnvironment;
use crate::error::HandshakeResult;
use crate::model::target::validate_scheme;
use log::{debug, warn};

/// Read-only view over the host's resolvable schemes.
///
/// Answers are never cached: a scheme may become available (or vanish)
/// between two calls.
pub struct SchemeRegistry<'env, E: HostEnvironment + ?Sized> {
    env: &'env E,
}

impl<'env, E: HostEnvironment + ?Sized> SchemeRegistry<'env, E> {
    pub fn new(env: &'env E) -> Self {
        Self { env }
    }

    /// Asks the host to resolve a bare `scheme://` target.
    ///
    /// # Errors
    /// - `InvalidScheme` when `scheme` is malformed; the host is not queried.
    pub fn is_available(&self, scheme: &str) -> HandshakeResult<bool> {
        if let Err(err) = validate_scheme(scheme) {
            warn!("event=scheme_check module=scheme_registry status=error reason=invalid_scheme");
            return Err(err);
        }

        let available = self.env.can_resolve(&format!("{scheme}://"));
        debug!(
            "event=scheme_check module=scheme_registry status=ok scheme={} available={}",
            scheme, available
        );
        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    use super::SchemeRegistry;
    use crate::env::InMemoryHostEnvironment;
    use crate::error::HandshakeError;

    #[test]
    fn reports_registered_scheme_as_available() {
        let env = InMemoryHostEnvironment::with_schemes(["app2"]).expect("valid schemes");
        let registry = SchemeRegistry::new(&env);
        assert!(registry.is_available("app2").expect("valid scheme"));
        assert_eq!(env.resolve_queries(), vec!["app2://"]);
    }

    #[test]
    fn reports_unregistered_scheme_as_unavailable() {
        let env = InMemoryHostEnvironment::new();
        let registry = SchemeRegistry::new(&env);
        assert!(!registry.is_available("app2").expect("valid scheme"));
    }

    #[test]
    fn malformed_scheme_fails_without_querying_host() {
        let env = InMemoryHostEnvironment::new();
        let registry = SchemeRegistry::new(&env);
        for scheme in ["", "app2://", "app 2", "\tapp2"] {
            let err = registry
                .is_available(scheme)
                .expect_err("malformed scheme must fail");
            assert!(matches!(err, HandshakeError::InvalidScheme(_)));
        }
        assert!(env.resolve_queries().is_empty());
    }

    #[test]
    fn answers_track_later_registration() {
        let mut env = InMemoryHostEnvironment::new();
        assert!(!SchemeRegistry::new(&env)
            .is_available("app2")
            .expect("valid scheme"));
        env.register_scheme("app2").expect("valid scheme");
        assert!(SchemeRegistry::new(&env)
            .is_available("app2")
            .expect("valid scheme"));
    }
}
