use serde::{Deserialize, Serialize};

/// What a given identity may do, computed once per request.
///
/// Centralizes the access rule so handlers never branch on identity
/// membership themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_read: bool,
    pub can_write: bool,
}

impl Capabilities {
    pub fn read_only() -> Self {
        Self { can_read: true, can_write: false }
    }

    pub fn read_write() -> Self {
        Self { can_read: true, can_write: true }
    }
}
