use serde::Deserialize;

/// JSON body accepted by the statement endpoints.
///
/// `identity` is the externally-verified caller string attached by the
/// upstream authentication step; the gateway does not verify it further.
#[derive(Debug, Clone, Deserialize)]
pub struct StatementBody {
    pub sql: String,
    #[serde(default)]
    pub identity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_optional_in_the_body() {
        let body: StatementBody = serde_json::from_str(r#"{"sql": "SELECT 1"}"#).unwrap();
        assert_eq!(body.sql, "SELECT 1");
        assert!(body.identity.is_none());
    }

    #[test]
    fn full_body_deserializes() {
        let body: StatementBody =
            serde_json::from_str(r#"{"sql": "SELECT 1", "identity": "alice"}"#).unwrap();
        assert_eq!(body.identity.as_deref(), Some("alice"));
    }
}
