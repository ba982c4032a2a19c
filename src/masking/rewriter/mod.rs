//! Embedded-value rewriting
//!
//! Rewrites one free-text column in place, replacing network identifiers
//! embedded in the text with their salted identifiers and leaving every
//! other byte of the text untouched.

pub mod rules;

pub use rules::{RewriteRule, RuleSet, RuleSetKind};

use crate::domain::{Cell, Dataset, Result};
use crate::masking::hasher::IdentityHasher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters for one rewrite pass over a column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    /// Column that was rewritten
    pub column: String,
    /// Cells whose text changed
    pub cells_rewritten: usize,
    /// Replacements per rule name
    pub replacements: BTreeMap<String, usize>,
}

impl RewriteStats {
    /// Total replacements across all rules
    pub fn total_replacements(&self) -> usize {
        self.replacements.values().sum()
    }
}

/// Applies a [`RuleSet`] using a shared [`IdentityHasher`]
#[derive(Debug, Clone)]
pub struct EmbeddedValueRewriter {
    hasher: IdentityHasher,
    rules: RuleSet,
}

impl EmbeddedValueRewriter {
    /// Create a rewriter
    pub fn new(hasher: IdentityHasher, rules: RuleSet) -> Self {
        Self { hasher, rules }
    }

    /// Create a rewriter for a rule set kind
    pub fn for_kind(hasher: IdentityHasher, kind: RuleSetKind) -> Result<Self> {
        Ok(Self::new(hasher, RuleSet::for_kind(kind)?))
    }

    /// Rule set in use
    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    /// Rewrite a single string
    pub fn rewrite_text(&self, text: &str) -> String {
        self.rules.rewrite(text, &self.hasher).0
    }

    /// Rewrite a cell. Only text cells are touched.
    pub fn rewrite_cell(&self, cell: &Cell) -> Cell {
        match cell {
            Cell::Text(text) => Cell::Text(self.rewrite_text(text)),
            other => other.clone(),
        }
    }

    /// Rewrite `column` of `dataset` in place
    ///
    /// Returns `None` when the column is absent.
    pub fn apply(&self, dataset: &mut Dataset, column: &str) -> Option<RewriteStats> {
        if !dataset.has_column(column) {
            tracing::debug!(column = %column, "Free-text column not present, skipping");
            return None;
        }

        tracing::info!(
            column = %column,
            rule_set = %self.rules.kind(),
            "Rewriting embedded values"
        );

        let mut stats = RewriteStats {
            column: column.to_string(),
            ..RewriteStats::default()
        };
        for rule in self.rules.rules() {
            stats.replacements.insert(rule.name().to_string(), 0);
        }

        dataset.map_column(column, |cell| {
            let Cell::Text(text) = cell else {
                return cell.clone();
            };
            let (rewritten, counts) = self.rules.rewrite(text, &self.hasher);
            if rewritten != *text {
                stats.cells_rewritten += 1;
            }
            for (rule, count) in self.rules.rules().iter().zip(counts) {
                *stats.replacements.entry(rule.name().to_string()).or_default() += count;
            }
            Cell::Text(rewritten)
        });

        tracing::debug!(
            column = %column,
            cells_rewritten = stats.cells_rewritten,
            replacements = stats.total_replacements(),
            "Embedded values rewritten"
        );

        Some(stats)
    }
}
