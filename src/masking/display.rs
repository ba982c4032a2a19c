//! Display redaction
//!
//! Display values are what ends up in human-facing reports: enough of the
//! original to recognise a subnet or the initial of an account, never enough
//! to recover the value behind the identifier.

use super::hasher::{normalize, MISSING_SENTINEL};
use crate::domain::Cell;
use serde::{Deserialize, Serialize};

/// Default placeholder for text too short to partially reveal
pub const DEFAULT_ANONYMOUS_PLACEHOLDER: &str = "anonymous";

/// How a sensitive column is redacted for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// IPv4 address: keep the /24 prefix
    Ip,
    /// Free text such as a username: keep the first character
    Text,
}

/// Produces display values for one column kind
#[derive(Debug, Clone)]
pub struct DisplayRedactor {
    kind: ColumnKind,
    anonymous_placeholder: String,
}

impl DisplayRedactor {
    /// Create a redactor
    pub fn new(kind: ColumnKind, anonymous_placeholder: impl Into<String>) -> Self {
        Self {
            kind,
            anonymous_placeholder: anonymous_placeholder.into(),
        }
    }

    /// Redact one cell. Empty text is treated like a missing cell.
    pub fn redact(&self, cell: &Cell) -> String {
        match (self.kind, cell.as_text().filter(|t| !t.is_empty())) {
            (ColumnKind::Ip, Some(text)) => redact_ip(&text),
            (ColumnKind::Ip, None) => MISSING_SENTINEL.to_string(),
            (ColumnKind::Text, Some(text)) => redact_text(&text, &self.anonymous_placeholder),
            (ColumnKind::Text, None) => self.anonymous_placeholder.clone(),
        }
    }
}

/// `"10.20.30.40(CN)"` → `"10.20.30.*"`
pub fn redact_ip(raw: &str) -> String {
    let prefix: Vec<&str> = normalize(raw).split('.').take(3).collect();
    format!("{}.*", prefix.join("."))
}

/// `"alice"` → `"a***"`; one character or less → `placeholder`
pub fn redact_text(raw: &str, placeholder: &str) -> String {
    let text = normalize(raw);
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) => format!("{first}***"),
        _ => placeholder.to_string(),
    }
}
