//! Column-level masking
//!
//! Each configured sensitive column is replaced by two derived columns:
//! `<label>_ID` carrying the salted identifier and `<label>_display`
//! carrying a partial redaction. The source column is then dropped.

use super::display::{ColumnKind, DisplayRedactor, DEFAULT_ANONYMOUS_PLACEHOLDER};
use super::hasher::IdentityHasher;
use crate::domain::{Cell, Dataset, LogmaskError, Result};
use serde::{Deserialize, Serialize};

/// Default suffix of identifier columns
pub const DEFAULT_ID_SUFFIX: &str = "_ID";

/// Default suffix of display columns
pub const DEFAULT_DISPLAY_SUFFIX: &str = "_display";

/// One sensitive column and how to mask it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Column name in the input sheet
    pub source: String,
    /// Prefix of the derived column names
    pub label: String,
    /// Display redaction kind
    pub kind: ColumnKind,
}

impl ColumnRule {
    /// Create a rule
    pub fn new(source: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            source: source.into(),
            label: label.into(),
            kind,
        }
    }
}

/// A column that was masked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedColumn {
    /// Dropped source column
    pub source: String,
    /// Added identifier column
    pub id_column: String,
    /// Added display column
    pub display_column: String,
}

/// Result of one masking pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMaskOutcome {
    /// Columns masked, in processing order
    pub masked: Vec<MaskedColumn>,
    /// Configured columns absent from the input
    pub skipped: Vec<String>,
}

/// Applies [`ColumnRule`]s to a [`Dataset`]
#[derive(Debug, Clone)]
pub struct ColumnMasker {
    hasher: IdentityHasher,
    rules: Vec<ColumnRule>,
    id_suffix: String,
    display_suffix: String,
    anonymous_placeholder: String,
}

impl ColumnMasker {
    /// Create a masker with the default suffixes and placeholder
    pub fn new(hasher: IdentityHasher, rules: Vec<ColumnRule>) -> Self {
        Self {
            hasher,
            rules,
            id_suffix: DEFAULT_ID_SUFFIX.to_string(),
            display_suffix: DEFAULT_DISPLAY_SUFFIX.to_string(),
            anonymous_placeholder: DEFAULT_ANONYMOUS_PLACEHOLDER.to_string(),
        }
    }

    /// Override the derived column suffixes
    pub fn with_suffixes(mut self, id_suffix: &str, display_suffix: &str) -> Self {
        self.id_suffix = id_suffix.to_string();
        self.display_suffix = display_suffix.to_string();
        self
    }

    /// Override the placeholder used for too-short text
    pub fn with_anonymous_placeholder(mut self, placeholder: &str) -> Self {
        self.anonymous_placeholder = placeholder.to_string();
        self
    }

    /// Configured rules
    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    /// Mask every configured column present in `dataset`
    ///
    /// # Errors
    ///
    /// Returns a validation error if a derived column name collides with
    /// its own source column.
    pub fn apply(&self, dataset: &mut Dataset) -> Result<ColumnMaskOutcome> {
        let mut outcome = ColumnMaskOutcome::default();

        for rule in &self.rules {
            let id_column = format!("{}{}", rule.label, self.id_suffix);
            let display_column = format!("{}{}", rule.label, self.display_suffix);
            if id_column == rule.source || display_column == rule.source {
                return Err(LogmaskError::Validation(format!(
                    "Derived column name collides with source column '{}'",
                    rule.source
                )));
            }

            let Some(cells) = dataset.column(&rule.source) else {
                tracing::debug!(column = %rule.source, "Column not present, skipping");
                outcome.skipped.push(rule.source.clone());
                continue;
            };

            tracing::debug!(column = %rule.source, kind = ?rule.kind, "Masking column");

            let redactor = DisplayRedactor::new(rule.kind, self.anonymous_placeholder.as_str());
            let (ids, displays): (Vec<Cell>, Vec<Cell>) = cells
                .map(|cell| {
                    (
                        Cell::Text(self.hasher.hash(cell)),
                        Cell::Text(redactor.redact(cell)),
                    )
                })
                .unzip();

            dataset.set_column(&id_column, ids)?;
            dataset.set_column(&display_column, displays)?;
            dataset.drop_column(&rule.source);
            crate::log_column_masked!(rule.source, id_column, display_column, dataset.row_count());

            outcome.masked.push(MaskedColumn {
                source: rule.source.clone(),
                id_column,
                display_column,
            });
        }

        Ok(outcome)
    }
}
