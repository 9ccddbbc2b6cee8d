//! Deny-list screening of statement text.
//!
//! This is a heuristic screen, not a security boundary: it rejects known
//! dangerous statement shapes and lets everything else through
//! (deny-list, fail-open). The real protection for write access is the
//! authorization gate plus least-privileged database roles at the
//! execution engine. Keeping the list narrow keeps false positives from
//! blocking legitimate queries.

use once_cell::sync::Lazy;
use regex::Regex;
use sqlgate_commons::ValidationOutcome;

struct DenyRule {
    pattern: Regex,
    reason: &'static str,
}

impl DenyRule {
    fn new(pattern: &str, reason: &'static str) -> Self {
        Self {
            // Rules are fixed at compile time; a non-compiling pattern is a
            // programming error caught by the test suite.
            pattern: Regex::new(pattern).expect("invalid deny-list pattern"),
            reason,
        }
    }
}

static DENY_RULES: Lazy<Vec<DenyRule>> = Lazy::new(|| {
    vec![
        DenyRule::new(
            r"(?i);\s*(drop|truncate|alter|grant|revoke)\b",
            "statement chaining into a destructive operation",
        ),
        DenyRule::new(
            r"--",
            "line comment could hide a trailing clause",
        ),
        DenyRule::new(
            r"(?i)/\*.*?\*/|/\*",
            "inline comment could hide a trailing clause",
        ),
        DenyRule::new(
            r"(?i)#.*(drop|delete|truncate|alter)",
            "hash comment followed by a destructive keyword",
        ),
        DenyRule::new(
            r"(?i)\bunion\b[\s(]+(all\s+)?select\b",
            "UNION-based read exfiltration attempt",
        ),
        DenyRule::new(
            r"(?i)\b(pg_shadow|pg_authid|pg_user_mapping)\b",
            "reference to a privileged system catalog",
        ),
        DenyRule::new(
            r"(?i)\b(pg_catalog|information_schema)\s*\.",
            "direct system catalog access; use the tables endpoint",
        ),
        DenyRule::new(
            r"(?i)\b(pg_read_file|pg_read_binary_file|pg_ls_dir|lo_import|lo_export)\s*\(",
            "privileged file-access procedure",
        ),
        DenyRule::new(
            r"(?i)\bcopy\b.+\bprogram\b",
            "COPY PROGRAM executes on the server host",
        ),
        DenyRule::new(
            r"(?i)\bdblink\s*\(",
            "cross-database execution procedure",
        ),
    ]
});

/// Screens raw statement text against the fixed deny-list.
///
/// Returns `valid = false` with a human-readable reason on the first
/// matching rule; statements matching no rule pass, even if novel attack
/// shapes exist.
pub fn validate(sql: &str) -> ValidationOutcome {
    for rule in DENY_RULES.iter() {
        if rule.pattern.is_match(sql) {
            return ValidationOutcome::reject(rule.reason);
        }
    }
    ValidationOutcome::pass()
}
