//! Pipeline run summary and reporting

use crate::config::PipelineKind;
use crate::masking::{MaskedColumn, RewriteStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Profile that ran
    pub pipeline: PipelineKind,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Input file
    pub input: PathBuf,

    /// Output file (None in dry-run mode)
    pub output: Option<PathBuf>,

    /// Rows processed
    pub rows: usize,

    /// Columns replaced by identifier/display pairs
    pub masked_columns: Vec<MaskedColumn>,

    /// Configured columns absent from the input
    pub skipped_columns: Vec<String>,

    /// Free-text rewrite counters (None when the column was absent or not configured)
    pub rewrite: Option<RewriteStats>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl RunSummary {
    /// Create an empty summary for a run starting now
    pub fn new(pipeline: PipelineKind, input: PathBuf) -> Self {
        Self {
            pipeline,
            started_at: Utc::now(),
            input,
            output: None,
            rows: 0,
            masked_columns: Vec::new(),
            skipped_columns: Vec::new(),
            rewrite: None,
            duration_ms: 0,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Whether the output file was written
    pub fn is_dry_run(&self) -> bool {
        self.output.is_none()
    }

    /// Total embedded values replaced in the free-text column
    pub fn total_replacements(&self) -> usize {
        self.rewrite
            .as_ref()
            .map_or(0, RewriteStats::total_replacements)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            pipeline = %self.pipeline,
            rows = self.rows,
            masked_columns = self.masked_columns.len(),
            skipped_columns = self.skipped_columns.len(),
            replacements = self.total_replacements(),
            duration_ms = self.duration_ms,
            dry_run = self.is_dry_run(),
            "Pipeline completed"
        );

        if !self.skipped_columns.is_empty() {
            tracing::debug!(
                pipeline = %self.pipeline,
                skipped = ?self.skipped_columns,
                "Configured columns not present in input"
            );
        }
    }
}
