//! Mapping of raw driver errors onto the public error taxonomy.
//!
//! Callers only ever see the kind and a bounded message; the raw text is
//! retained inside the audit record for operator diagnosis.

use sqlgate_commons::ErrorKind;

/// Maximum length of the public message derived from an unrecognized error.
const GENERIC_MESSAGE_LEN: usize = 120;

/// Classifies raw driver error text into the public taxonomy and builds
/// the caller-safe message for it.
pub fn sanitize(raw: &str) -> (ErrorKind, String) {
    let lowered = raw.to_lowercase();

    if lowered.contains("password authentication failed")
        || lowered.contains("permission denied")
        || (lowered.contains("role") && lowered.contains("does not exist"))
        || lowered.contains("authentication")
    {
        return (
            ErrorKind::AuthFailure,
            "database rejected the configured credentials or denied access".to_string(),
        );
    }

    if lowered.contains("timed out")
        || lowered.contains("timeout")
        || (lowered.contains("pool") && lowered.contains("closed"))
    {
        return (
            ErrorKind::Timeout,
            "statement execution timed out".to_string(),
        );
    }

    if (lowered.contains("relation") || lowered.contains("column") || lowered.contains("table"))
        && lowered.contains("does not exist")
    {
        return (
            ErrorKind::SchemaError,
            "statement references a missing table or column".to_string(),
        );
    }

    (ErrorKind::Generic, truncate(raw))
}

fn truncate(raw: &str) -> String {
    if raw.len() <= GENERIC_MESSAGE_LEN {
        raw.to_string()
    } else {
        let mut cut = GENERIC_MESSAGE_LEN;
        while !raw.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &raw[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_errors_map_to_auth_failure() {
        let (kind, msg) =
            sanitize("FATAL: password authentication failed for user \"svc_reports\"");
        assert_eq!(kind, ErrorKind::AuthFailure);
        assert!(!msg.contains("svc_reports"), "public message must not leak the role name");
    }

    #[test]
    fn permission_errors_map_to_auth_failure() {
        let (kind, _) = sanitize("ERROR: permission denied for table secrets");
        assert_eq!(kind, ErrorKind::AuthFailure);
    }

    #[test]
    fn timeouts_map_to_timeout() {
        let (kind, msg) = sanitize("pool timed out while waiting for an open connection");
        assert_eq!(kind, ErrorKind::Timeout);
        assert!(!msg.contains("pool"), "public message must not describe internals");
    }

    #[test]
    fn missing_relations_map_to_schema_error() {
        let (kind, _) = sanitize("ERROR: relation \"nope\" does not exist");
        assert_eq!(kind, ErrorKind::SchemaError);
        let (kind, _) = sanitize("ERROR: column \"ghost\" does not exist");
        assert_eq!(kind, ErrorKind::SchemaError);
    }

    #[test]
    fn unknown_errors_fall_back_to_generic_truncated() {
        let raw = format!("ERROR: something odd happened {}", "x".repeat(300));
        let (kind, msg) = sanitize(&raw);
        assert_eq!(kind, ErrorKind::Generic);
        assert!(msg.len() <= GENERIC_MESSAGE_LEN + 3);
        assert!(msg.ends_with("..."));
    }

    #[test]
    fn short_generic_messages_pass_through() {
        let (kind, msg) = sanitize("ERROR: division by zero");
        assert_eq!(kind, ErrorKind::Generic);
        assert_eq!(msg, "ERROR: division by zero");
    }
}
