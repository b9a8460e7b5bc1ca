use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Content-derived identifier for a question.
///
/// The value is the lowercase hex SHA-256 digest of the trimmed question text,
/// so it survives reordering of the backing file and process restarts.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Derives the stable id for a question text.
    #[must_use]
    pub fn for_question(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.trim().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Returns the underlying hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Client-supplied ids are wrapped as-is; an id that was never derived simply misses on lookup.
impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_sha256_hex_of_trimmed_text() {
        // sha256("abc")
        let id = QuestionId::for_question("  abc\t");
        assert_eq!(
            id.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_id_is_deterministic() {
        let a = QuestionId::for_question("What is the capital of France?");
        let b = QuestionId::for_question("What is the capital of France?");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_surrounding_whitespace_does_not_change_id() {
        let a = QuestionId::for_question("Capital of Peru?");
        let b = QuestionId::for_question("   Capital of Peru?  ");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_text_yields_different_id() {
        let a = QuestionId::for_question("Capital of Peru?");
        let b = QuestionId::for_question("Capital of Chile?");
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_display_and_from_string() {
        let derived = QuestionId::for_question("Q");
        let wrapped = QuestionId::from(derived.to_string());
        assert_eq!(derived, wrapped);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = QuestionId::from("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
    }
}
