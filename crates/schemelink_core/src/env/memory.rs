//! In-process host environment backed by a scheme set.
//!
//! Serves as the test fake, the CLI host and the mobile host bridge: the
//! platform side registers the schemes it can open and drains dispatched
//! URLs to open them natively. Both histories are bounded: when the host
//! stops draining, the oldest pending dispatch is dropped and logged.

use crate::env::HostEnvironment;
use crate::error::HandshakeResult;
use crate::model::target::validate_scheme;
use log::warn;
use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};

const MAX_RECORDED_QUERIES: usize = 64;
const MAX_PENDING_DISPATCHES: usize = 64;

#[derive(Debug, Default)]
pub struct InMemoryHostEnvironment {
    schemes: BTreeSet<String>,
    resolve_queries: RefCell<VecDeque<String>>,
    dispatched: RefCell<VecDeque<String>>,
}

impl InMemoryHostEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment with every scheme in `schemes` registered.
    pub fn with_schemes<'a>(schemes: impl IntoIterator<Item = &'a str>) -> HandshakeResult<Self> {
        let mut env = Self::new();
        for scheme in schemes {
            env.register_scheme(scheme)?;
        }
        Ok(env)
    }

    /// Marks `scheme` as resolvable. Re-registering is a no-op.
    pub fn register_scheme(&mut self, scheme: &str) -> HandshakeResult<()> {
        validate_scheme(scheme)?;
        self.schemes.insert(scheme.to_string());
        Ok(())
    }

    /// Returns whether `scheme` was registered before removal.
    pub fn unregister_scheme(&mut self, scheme: &str) -> bool {
        self.schemes.remove(scheme)
    }

    /// Returns sorted registered schemes.
    pub fn registered_schemes(&self) -> Vec<String> {
        self.schemes.iter().cloned().collect()
    }

    /// Returns the most recent URLs passed to `can_resolve`, oldest first.
    pub fn resolve_queries(&self) -> Vec<String> {
        self.resolve_queries.borrow().iter().cloned().collect()
    }

    /// Returns pending accepted dispatches, oldest first.
    pub fn dispatched(&self) -> Vec<String> {
        self.dispatched.borrow().iter().cloned().collect()
    }

    /// Drains accepted dispatches so the platform host can open them.
    pub fn take_dispatched(&self) -> Vec<String> {
        self.dispatched.borrow_mut().drain(..).collect()
    }

    fn resolves(&self, url: &str) -> bool {
        url.split_once("://")
            .is_some_and(|(scheme, _)| self.schemes.contains(scheme))
    }
}

impl HostEnvironment for InMemoryHostEnvironment {
    fn can_resolve(&self, url: &str) -> bool {
        let mut queries = self.resolve_queries.borrow_mut();
        if queries.len() == MAX_RECORDED_QUERIES {
            queries.pop_front();
        }
        queries.push_back(url.to_string());
        drop(queries);
        self.resolves(url)
    }

    fn dispatch(&self, url: &str) -> bool {
        if !self.resolves(url) {
            return false;
        }
        let mut pending = self.dispatched.borrow_mut();
        if pending.len() == MAX_PENDING_DISPATCHES {
            pending.pop_front();
            warn!(
                "event=dispatch_queue_full module=host_environment status=error dropped=oldest capacity={}",
                MAX_PENDING_DISPATCHES
            );
        }
        pending.push_back(url.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryHostEnvironment, MAX_PENDING_DISPATCHES, MAX_RECORDED_QUERIES};
    use crate::env::HostEnvironment;
    use crate::error::HandshakeError;

    #[test]
    fn resolves_only_registered_schemes() {
        let env = InMemoryHostEnvironment::with_schemes(["app2"]).expect("valid schemes");
        assert!(env.can_resolve("app2://"));
        assert!(!env.can_resolve("app1://"));
        assert!(!env.can_resolve("not-a-url"));
        assert_eq!(env.resolve_queries(), vec!["app2://", "app1://", "not-a-url"]);
    }

    #[test]
    fn resolve_history_keeps_most_recent_queries() {
        let env = InMemoryHostEnvironment::new();
        for index in 0..(MAX_RECORDED_QUERIES + 3) {
            env.can_resolve(&format!("app{index}://"));
        }
        let queries = env.resolve_queries();
        assert_eq!(queries.len(), MAX_RECORDED_QUERIES);
        assert_eq!(queries[0], "app3://");
    }

    #[test]
    fn records_only_accepted_dispatches() {
        let env = InMemoryHostEnvironment::with_schemes(["app2"]).expect("valid schemes");
        assert!(env.dispatch("app2:///id"));
        assert!(!env.dispatch("app1://"));
        assert_eq!(env.dispatched(), vec!["app2:///id"]);
    }

    #[test]
    fn pending_dispatches_drop_oldest_when_not_drained() {
        let env = InMemoryHostEnvironment::with_schemes(["app2"]).expect("valid schemes");
        for index in 0..(MAX_PENDING_DISPATCHES + 2) {
            assert!(env.dispatch(&format!("app2:///id-{index}")));
        }
        let pending = env.take_dispatched();
        assert_eq!(pending.len(), MAX_PENDING_DISPATCHES);
        assert_eq!(pending[0], "app2:///id-2");
        assert_eq!(
            pending.last().map(String::as_str),
            Some(format!("app2:///id-{}", MAX_PENDING_DISPATCHES + 1).as_str())
        );
    }

    #[test]
    fn take_dispatched_drains_queue() {
        let env = InMemoryHostEnvironment::with_schemes(["app1"]).expect("valid schemes");
        env.dispatch("app1://");
        assert_eq!(env.take_dispatched(), vec!["app1://"]);
        assert!(env.take_dispatched().is_empty());
    }

    #[test]
    fn register_rejects_malformed_scheme() {
        let mut env = InMemoryHostEnvironment::new();
        let err = env
            .register_scheme("app 2")
            .expect_err("malformed scheme must fail");
        assert!(matches!(err, HandshakeError::InvalidScheme(_)));
        assert!(env.registered_schemes().is_empty());
    }

    #[test]
    fn unregister_removes_scheme() {
        let mut env = InMemoryHostEnvironment::with_schemes(["app2"]).expect("valid schemes");
        assert!(env.unregister_scheme("app2"));
        assert!(!env.unregister_scheme("app2"));
        assert!(!env.can_resolve("app2://"));
    }
}
