use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one conversation session.
///
/// Sessions are never persisted; the id exists so log lines from different
/// sessions in the same process can be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight hex digits, used as a compact tracing field.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_v4_uuid() {
        let sid = SessionId::new();
        let parsed = uuid::Uuid::parse_str(sid.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn short_form_is_hex_prefix() {
        let sid = SessionId::new();
        let short = sid.short();
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sid.as_str().starts_with(short));
    }

    #[test]
    fn display_matches_as_str() {
        let sid = SessionId::default();
        assert_eq!(sid.to_string(), sid.as_str());
    }

    #[test]
    fn serializes_as_plain_string() {
        let sid = SessionId::new();
        let json = serde_json::to_string(&sid).unwrap();
        assert_eq!(json, format!("\"{}\"", sid.as_str()));
        let back: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sid);
    }
}
