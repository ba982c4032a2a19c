// logmask - Salted pseudonymization of security log exports
// Copyright (c) 2025 logmask Contributors
// Licensed under the MIT License

//! # logmask - Salted pseudonymization of security log exports
//!
//! logmask takes spreadsheet exports from network security products (IAM
//! audit logs, SIP device logs) and replaces personal and network
//! identifiers with stable, salted identifiers so the data can be shared
//! for analysis without exposing who or which host was involved.
//!
//! ## Overview
//!
//! - **Identifiers**: `SHA-256(normalized value + salt)`, first 12 hex
//!   characters, uppercase. The same value always gets the same identifier,
//!   in every file hashed with the same salt.
//! - **Display values**: `10.20.30.*` for addresses, `a***` for names.
//! - **Embedded values**: IPs and MACs inside free-text log lines are
//!   rewritten in place; the rest of the text is untouched.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pipeline orchestration and run summaries
//! - [`masking`] - Hasher, display redaction, column masking, embedded-value rewriting
//! - [`adapters`] - Spreadsheet reading and writing
//! - [`domain`] - Cells, datasets and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logmask::config::{load_config_or_default, PipelineKind};
//! use logmask::core::pipeline::Pipeline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default(None)?;
//!
//!     let summary = Pipeline::new(&config, PipelineKind::Sip)?.run()?;
//!
//!     println!("Masked {} rows", summary.rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Correlating Across Files
//!
//! Both pipelines share one salt, so an address seen in the IAM export and
//! the SIP export maps to the same identifier:
//!
//! ```rust
//! use logmask::config::LogmaskConfig;
//! use logmask::domain::Cell;
//! use logmask::masking::CaseMode;
//!
//! let config = LogmaskConfig::default();
//! let iam = config.masking.hasher(CaseMode::Lowercase);
//! let sip = config.masking.hasher(CaseMode::Preserve);
//!
//! let ip = Cell::text("10.0.0.1");
//! assert_eq!(iam.hash(&ip), sip.hash(&ip));
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::LogmaskError`]. Spreadsheet failures carry the path and cause in
//! [`domain::SpreadsheetError`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod masking;
