//! Write authorization against the immutable privileged-identity set.

use std::collections::HashSet;

use log::warn;
use sqlgate_commons::{AuthorizationDecision, Capabilities, Identity, OperationKind};

/// Decides whether an identity may run a write statement.
///
/// The privileged set is supplied once at construction and never mutated
/// afterwards, so the decision is a pure lookup. Tests inject their own
/// sets per scenario.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    privileged: HashSet<Identity>,
}

impl AuthorizationGate {
    pub fn new(privileged: impl IntoIterator<Item = Identity>) -> Self {
        let privileged: HashSet<Identity> = privileged.into_iter().collect();
        if privileged.is_empty() {
            warn!("privileged identity set is empty; gateway will reject all writes");
        }
        Self { privileged }
    }

    /// Capability table for an identity, computed once per request.
    pub fn capabilities_for(&self, identity: &Identity) -> Capabilities {
        if self.privileged.contains(identity) {
            Capabilities::read_write()
        } else {
            Capabilities::read_only()
        }
    }

    /// Reads are allowed for any authenticated identity; writes require
    /// membership in the privileged set.
    pub fn authorize(&self, identity: &Identity, kind: OperationKind) -> AuthorizationDecision {
        if !kind.is_write() {
            return AuthorizationDecision::allow();
        }

        if self.capabilities_for(identity).can_write {
            AuthorizationDecision::allow()
        } else {
            AuthorizationDecision::deny(format!(
                "identity '{}' lacks write privilege; a privileged identity is required for write statements",
                identity
            ))
        }
    }

    /// Identities allowed to write, for diagnostic responses.
    pub fn privileged_identities(&self) -> Vec<&Identity> {
        let mut ids: Vec<&Identity> = self.privileged.iter().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AuthorizationGate {
        AuthorizationGate::new([Identity::from("bob"), Identity::from("carol")])
    }

    #[test]
    fn reads_always_allowed() {
        let g = gate();
        assert!(g.authorize(&Identity::from("alice"), OperationKind::Read).allowed);
        assert!(g.authorize(&Identity::from("bob"), OperationKind::Read).allowed);
    }

    #[test]
    fn writes_require_membership() {
        let g = gate();
        assert!(g.authorize(&Identity::from("bob"), OperationKind::Write).allowed);
        let denied = g.authorize(&Identity::from("alice"), OperationKind::Write);
        assert!(!denied.allowed);
        let reason = denied.reason.unwrap();
        assert!(reason.contains("alice"));
        assert!(reason.contains("write privilege"));
    }

    #[test]
    fn empty_set_rejects_all_writes() {
        let g = AuthorizationGate::new([]);
        assert!(!g.authorize(&Identity::from("bob"), OperationKind::Write).allowed);
        assert!(g.authorize(&Identity::from("bob"), OperationKind::Read).allowed);
    }

    #[test]
    fn capabilities_reflect_membership() {
        let g = gate();
        assert_eq!(g.capabilities_for(&Identity::from("bob")), Capabilities::read_write());
        assert_eq!(g.capabilities_for(&Identity::from("alice")), Capabilities::read_only());
    }

    #[test]
    fn privileged_identities_are_sorted() {
        let g = gate();
        let ids: Vec<&str> = g.privileged_identities().iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["bob", "carol"]);
    }
}
