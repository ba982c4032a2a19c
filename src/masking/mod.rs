//! Masking module for logmask
//!
//! This module provides the transforms applied to a loaded log export.
//!
//! # Architecture
//!
//! - **Hasher**: salted, truncated SHA-256 identifiers shared by every pipeline
//! - **Display**: partial redaction for human-facing report columns
//! - **Columns**: replaces each sensitive column with `_ID` and `_display` columns
//! - **Rewriter**: rewrites IPs and MAC addresses embedded in one free-text column
//!
//! # Usage
//!
//! ```rust
//! use logmask::config::secret_string;
//! use logmask::masking::{CaseMode, ColumnKind, ColumnMasker, ColumnRule, IdentityHasher};
//! use logmask::domain::{Cell, Dataset};
//!
//! # fn example() -> logmask::domain::Result<()> {
//! let hasher = IdentityHasher::new(secret_string("salt".to_string()), CaseMode::Lowercase);
//! let masker = ColumnMasker::new(
//!     hasher,
//!     vec![ColumnRule::new("用户名", "用户", ColumnKind::Text)],
//! );
//!
//! let mut dataset = Dataset::new(vec!["用户名".to_string()]);
//! dataset.push_row(vec![Cell::text("alice")])?;
//! masker.apply(&mut dataset)?;
//! assert_eq!(dataset.headers(), &["用户_ID", "用户_display"]);
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod display;
pub mod hasher;
pub mod rewriter;

// Re-export main types
pub use columns::{ColumnMaskOutcome, ColumnMasker, ColumnRule, MaskedColumn};
pub use display::{ColumnKind, DisplayRedactor};
pub use hasher::{CaseMode, IdentityHasher, MISSING_SENTINEL};
pub use rewriter::{EmbeddedValueRewriter, RewriteStats, RuleSet, RuleSetKind};
