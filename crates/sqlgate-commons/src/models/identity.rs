// Type-safe wrapper for caller identities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for the externally-verified caller identity string.
///
/// This newtype ensures identities cannot be confused with SQL text or
/// other string values flowing through the pipeline. The string itself is
/// produced by an upstream authentication step; the gateway treats it as
/// opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Creates a new Identity from a string.
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }

    /// An identity is usable only if the upstream verifier produced a
    /// non-blank string.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_identity_is_empty() {
        assert!(Identity::from("").is_empty());
        assert!(Identity::from("   ").is_empty());
        assert!(!Identity::from("alice").is_empty());
    }
}
