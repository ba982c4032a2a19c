//! Domain models and types for logmask.
//!
//! The domain layer provides:
//! - **Cells and datasets** ([`Cell`], [`Dataset`]): the in-memory table every
//!   transform operates on
//! - **Error types** ([`LogmaskError`], [`SpreadsheetError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use logmask::domain::{Cell, Dataset};
//!
//! # fn example() -> logmask::domain::Result<()> {
//! let mut dataset = Dataset::new(vec!["用户名".to_string(), "详情".to_string()]);
//! dataset.push_row(vec![Cell::text("alice"), Cell::Missing])?;
//! assert_eq!(dataset.row_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod dataset;
pub mod errors;
pub mod result;

// Re-export commonly used types for convenience
pub use cell::Cell;
pub use dataset::Dataset;
pub use errors::{LogmaskError, SpreadsheetError};
pub use result::Result;
