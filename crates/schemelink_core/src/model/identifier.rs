//! Session identifier handed from caller to callee.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque token carried as the invocation path segment.
///
/// Any string is accepted on the receiving side; no format is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionIdentifier(String);

impl SessionIdentifier {
    /// Generates a fresh identifier in lowercase hyphenated UUID v4 form.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Wraps a fixed literal token, e.g. for smoke-testing a callee.
    pub fn fixed(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SessionIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionIdentifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::SessionIdentifier;
    use uuid::Uuid;

    #[test]
    fn generated_identifier_is_lowercase_uuid() {
        let id = SessionIdentifier::generate();
        assert_eq!(id.as_str(), id.as_str().to_ascii_lowercase());
        assert_eq!(id.as_str().len(), 36);
        let parsed = Uuid::parse_str(id.as_str()).expect("generated id should parse as uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn generated_identifiers_differ() {
        assert_ne!(SessionIdentifier::generate(), SessionIdentifier::generate());
    }

    #[test]
    fn fixed_identifier_keeps_literal() {
        let id = SessionIdentifier::fixed("foobar");
        assert_eq!(id.as_str(), "foobar");
        assert_eq!(id.to_string(), "foobar");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SessionIdentifier::fixed("barfoo");
        let json = serde_json::to_value(&id).expect("serialize identifier");
        assert_eq!(json, serde_json::json!("barfoo"));
    }
}
