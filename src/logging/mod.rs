//! Logging and observability
//!
//! - Console logs on stderr with configurable level
//! - Optional JSON file logs with rotation
//!
//! Sensitive cell values are never logged; events carry column names,
//! counts and paths only.
//!
//! # Example
//!
//! ```no_run
//! use logmask::logging::init_logging;
//! use logmask::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a pipeline run
///
/// # Example
///
/// ```no_run
/// use logmask::log_pipeline_start;
/// use logmask::config::PipelineKind;
/// use std::path::Path;
///
/// log_pipeline_start!(PipelineKind::Iam, Path::new("iam.xlsx"), false);
/// ```
#[macro_export]
macro_rules! log_pipeline_start {
    ($pipeline:expr, $input:expr, $dry_run:expr) => {
        tracing::info!(
            pipeline = %$pipeline,
            input = %$input.display(),
            dry_run = $dry_run,
            "Starting pipeline"
        );
    };
}

/// Log a masked column
///
/// # Example
///
/// ```no_run
/// use logmask::log_column_masked;
///
/// log_column_masked!("源IP", "源地址_ID", "源地址_display", 120);
/// ```
#[macro_export]
macro_rules! log_column_masked {
    ($source:expr, $id_column:expr, $display_column:expr, $rows:expr) => {
        tracing::info!(
            column = %$source,
            id_column = %$id_column,
            display_column = %$display_column,
            rows = $rows,
            "Column masked"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use logmask::log_error_with_context;
/// use logmask::domain::LogmaskError;
///
/// let error = LogmaskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
