//! Rewrite rules for embedded network identifiers
//!
//! A rule is a compiled pattern plus the replacement it produces. Rules in a
//! [`RuleSet`] run one after another over the same text; each one is a single
//! leftmost-first, non-overlapping scan.

use crate::domain::Result;
use crate::masking::hasher::{is_identifier, IdentityHasher};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Bare dotted-quad. Octet values are not range-checked.
pub const IPV4_PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b";

/// Six hex pairs joined uniformly by `:` or uniformly by `-`
pub const MAC_PATTERN: &str =
    r"[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}|[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}";

/// `SrcIP=` followed by a run of digits and dots
pub const SRC_IP_PATTERN: &str = r"(SrcIP=)([0-9.]+)";

/// `DstIP=` followed by a run of digits and dots
pub const DST_IP_PATTERN: &str = r"(DstIP=)([0-9.]+)";

/// Prefix put in front of hashed MAC addresses
pub const MAC_PREFIX: &str = "MAC_";

/// Which rule set a free-text column is rewritten with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSetKind {
    /// Untagged IPv4 and MAC addresses anywhere in narrative text
    Generic,
    /// Only `SrcIP=` / `DstIP=` tagged values in structured log lines
    KeyValue,
}

impl std::fmt::Display for RuleSetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::KeyValue => write!(f, "key_value"),
        }
    }
}

/// What a match is replaced with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replacement {
    /// Whole match → `prefix` + hash(match)
    HashMatch { prefix: &'static str },
    /// Group 1 (the tag) is kept, group 2 (the value) → hash(value)
    HashTaggedValue,
}

/// A compiled pattern and its replacement
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl RewriteRule {
    /// Compile a rule
    ///
    /// # Errors
    ///
    /// Returns a pattern error if `pattern` does not compile.
    pub fn new(name: &'static str, pattern: &str, replacement: Replacement) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }

    /// Rule name, used in run summaries
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rewrite `text`, returning the new text and the number of replacements
    ///
    /// A tagged value that is the leading digits of an identifier from an
    /// earlier pass is left alone.
    pub fn apply<'t>(&self, text: &'t str, hasher: &IdentityHasher) -> (Cow<'t, str>, usize) {
        let mut count = 0usize;
        let rewritten = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            match self.replacement {
                Replacement::HashMatch { prefix } => {
                    count += 1;
                    format!("{prefix}{}", hasher.hash_str(&caps[0]))
                }
                Replacement::HashTaggedValue => {
                    let end = caps.get(0).map_or(text.len(), |m| m.end());
                    if is_hashed_value(&caps[2], &text[end..]) {
                        return caps[0].to_string();
                    }
                    count += 1;
                    format!("{}{}", &caps[1], hasher.hash_str(&caps[2]))
                }
            }
        });
        if count == 0 {
            return (Cow::Borrowed(text), 0);
        }
        (rewritten, count)
    }
}

/// Whether a tagged digit run plus the alphanumerics after it is an identifier
fn is_hashed_value(value: &str, rest: &str) -> bool {
    let tail_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let candidate = format!("{value}{}", &rest[..tail_len]);
    is_identifier(&candidate)
}

/// An ordered list of rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    kind: RuleSetKind,
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    /// Build the rule set for `kind`
    pub fn for_kind(kind: RuleSetKind) -> Result<Self> {
        match kind {
            RuleSetKind::Generic => Self::generic(),
            RuleSetKind::KeyValue => Self::key_value(),
        }
    }

    /// IPv4 first, then MAC
    pub fn generic() -> Result<Self> {
        Ok(Self {
            kind: RuleSetKind::Generic,
            rules: vec![
                RewriteRule::new("ipv4", IPV4_PATTERN, Replacement::HashMatch { prefix: "" })?,
                RewriteRule::new(
                    "mac",
                    MAC_PATTERN,
                    Replacement::HashMatch { prefix: MAC_PREFIX },
                )?,
            ],
        })
    }

    /// `SrcIP=` first, then `DstIP=`
    pub fn key_value() -> Result<Self> {
        Ok(Self {
            kind: RuleSetKind::KeyValue,
            rules: vec![
                RewriteRule::new("src_ip", SRC_IP_PATTERN, Replacement::HashTaggedValue)?,
                RewriteRule::new("dst_ip", DST_IP_PATTERN, Replacement::HashTaggedValue)?,
            ],
        })
    }

    /// Kind of this set
    pub fn kind(&self) -> RuleSetKind {
        self.kind
    }

    /// Rules in application order
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Run every rule in order; the count vector is parallel to [`Self::rules`]
    pub fn rewrite(&self, text: &str, hasher: &IdentityHasher) -> (String, Vec<usize>) {
        let mut current = text.to_string();
        let mut counts = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let (rewritten, count) = rule.apply(&current, hasher);
            if count > 0 {
                current = rewritten.into_owned();
            }
            counts.push(count);
        }
        (current, counts)
    }
}
