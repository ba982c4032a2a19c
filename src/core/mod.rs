//! Core orchestration for logmask.
//!
//! # Modules
//!
//! - [`pipeline`] - Pipeline runner and run summary
//!
//! # Masking Workflow
//!
//! 1. **Load**: Read the first worksheet of the input spreadsheet
//! 2. **Mask**: Replace each sensitive column with `<label>_ID` and `<label>_display`
//! 3. **Rewrite**: Hash IPs and MACs embedded in the free-text column
//! 4. **Write**: Save the masked sheet as `.xlsx`
//! 5. **Report**: Return a [`pipeline::RunSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use logmask::config::{load_config_or_default, PipelineKind};
//! use logmask::core::pipeline::Pipeline;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default(Some("logmask.toml"))?;
//!
//! let pipeline = Pipeline::new(&config, PipelineKind::Iam)?;
//! let summary = pipeline.run()?;
//!
//! println!("Rows: {}", summary.rows);
//! println!("Masked columns: {}", summary.masked_columns.len());
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
