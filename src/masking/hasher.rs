//! Salted identity hashing
//!
//! Every pipeline derives identifiers through an [`IdentityHasher`] built
//! from the same salt, so a value masked in one dataset can be joined with
//! the same value masked in another.

use crate::config::SecretString;
use crate::domain::Cell;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier emitted for missing or empty values. Never hashed.
pub const MISSING_SENTINEL: &str = "N/A";

/// Number of hex characters kept from the digest
pub const IDENTIFIER_LEN: usize = 12;

/// How normalized text is case-folded before hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    /// Hash the text as written
    #[default]
    Preserve,
    /// Lowercase before hashing (case-insensitive identities such as usernames)
    Lowercase,
}

/// Deterministic salted hasher shared by all pipelines
#[derive(Clone)]
pub struct IdentityHasher {
    salt: SecretString,
    case_mode: CaseMode,
}

impl IdentityHasher {
    /// Create a hasher with the given salt and case mode
    pub fn new(salt: SecretString, case_mode: CaseMode) -> Self {
        Self { salt, case_mode }
    }

    /// Hash a cell. Missing cells and empty strings map to [`MISSING_SENTINEL`].
    pub fn hash(&self, cell: &Cell) -> String {
        match cell.as_text() {
            Some(text) => self.hash_str(&text),
            None => MISSING_SENTINEL.to_string(),
        }
    }

    /// Hash raw text. The empty string maps to [`MISSING_SENTINEL`].
    pub fn hash_str(&self, raw: &str) -> String {
        if raw.is_empty() {
            return MISSING_SENTINEL.to_string();
        }

        let normalized = normalize(raw);
        let normalized = match self.case_mode {
            CaseMode::Preserve => normalized.to_string(),
            CaseMode::Lowercase => normalized.to_lowercase(),
        };

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hasher.update(self.salt.expose_secret().as_str().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..IDENTIFIER_LEN].to_uppercase()
    }
}

impl fmt::Debug for IdentityHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityHasher")
            .field("salt", &"[REDACTED]")
            .field("case_mode", &self.case_mode)
            .finish()
    }
}

/// Drop any trailing parenthetical annotation and surrounding whitespace
///
/// `"1.2.3.4(China)"` becomes `"1.2.3.4"`, `" Alice (admin)"` becomes `"Alice"`.
pub fn normalize(raw: &str) -> &str {
    raw.split('(').next().unwrap_or_default().trim()
}

/// Whether a string has the shape of an identifier produced by [`IdentityHasher`]
pub fn is_identifier(value: &str) -> bool {
    value.len() == IDENTIFIER_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}
