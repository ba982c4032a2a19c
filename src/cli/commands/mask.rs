//! Mask commands implementation
//!
//! `iam` and `sip` run one pipeline; `all` runs both and keeps going when
//! one of them fails.

use super::{exit_code_for, EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::config::{LogmaskConfig, PipelineKind};
use crate::core::pipeline::{run_all, Pipeline, RunSummary};
use crate::domain::Result;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the iam and sip commands
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Override the input spreadsheet
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the output spreadsheet
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run every transform but don't write the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Write the run summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}

impl MaskArgs {
    /// Execute a single pipeline
    pub fn execute(&self, kind: PipelineKind, mut config: LogmaskConfig) -> anyhow::Result<i32> {
        tracing::info!(pipeline = %kind, "Starting mask command");

        let profile = config.pipelines.get_mut(kind);
        if let Some(input) = &self.input {
            tracing::info!(input = %input.display(), "Overriding input from CLI");
            profile.input = input.clone();
        }
        if let Some(output) = &self.output {
            tracing::info!(output = %output.display(), "Overriding output from CLI");
            profile.output = output.clone();
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        announce(kind, &config);
        let result = Pipeline::new(&config, kind).and_then(|pipeline| pipeline.run());
        let (code, summary) = report(kind, result);

        if let (Some(path), Some(summary)) = (&self.summary, summary) {
            if let Err(e) = write_summary(path, &[summary]) {
                eprintln!("Failed to write summary: {e}");
                return Ok(EXIT_FATAL);
            }
        }
        Ok(code)
    }
}

/// Arguments for the all command
#[derive(Args, Debug)]
pub struct AllArgs {
    /// Run every transform but don't write the output files
    #[arg(long)]
    pub dry_run: bool,

    /// Write the run summaries as a JSON array to this path
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}

impl AllArgs {
    /// Execute every pipeline in turn
    ///
    /// Returns the highest exit code of the individual runs.
    pub fn execute(&self, mut config: LogmaskConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting all pipelines");

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        for kind in PipelineKind::ALL {
            announce(kind, &config);
        }
        println!();

        let mut exit_code = EXIT_OK;
        let mut summaries = Vec::new();
        for (kind, result) in run_all(&config) {
            let (code, summary) = report(kind, result);
            exit_code = exit_code.max(code);
            summaries.extend(summary);
            println!();
        }

        println!(
            "Pipelines completed: {}/{}",
            summaries.len(),
            PipelineKind::ALL.len()
        );

        if let Some(path) = &self.summary {
            if let Err(e) = write_summary(path, &summaries) {
                eprintln!("Failed to write summary: {e}");
                return Ok(EXIT_FATAL);
            }
        }
        Ok(exit_code)
    }
}

fn announce(kind: PipelineKind, config: &LogmaskConfig) {
    let profile = config.pipeline(kind);
    if config.application.dry_run {
        println!("🔍 DRY RUN MODE - {kind} output will not be written");
    }
    println!(
        "🚀 Masking {kind}: {} → {}",
        profile.input.display(),
        profile.output.display()
    );
}

/// Print the outcome of one pipeline and map it to an exit code
fn report(kind: PipelineKind, result: Result<RunSummary>) -> (i32, Option<RunSummary>) {
    match result {
        Ok(summary) => {
            print_summary(&summary);
            (EXIT_OK, Some(summary))
        }
        Err(e) => {
            tracing::error!(pipeline = %kind, error = %e, "Pipeline failed");
            println!("❌ {kind} failed: {e}");
            (exit_code_for(&e), None)
        }
    }
}

fn print_summary(summary: &RunSummary) {
    for column in &summary.masked_columns {
        println!(
            "   ✓ {} → {}, {}",
            column.source, column.id_column, column.display_column
        );
    }
    for column in &summary.skipped_columns {
        println!("   - {column} not present, skipped");
    }
    if let Some(rewrite) = &summary.rewrite {
        println!(
            "   ✓ {}: {} values replaced in {} cells",
            rewrite.column,
            rewrite.total_replacements(),
            rewrite.cells_rewritten
        );
    }

    match &summary.output {
        Some(output) => println!(
            "✅ {} completed: {} rows written to {} in {}ms",
            summary.pipeline,
            summary.rows,
            output.display(),
            summary.duration_ms
        ),
        None => println!(
            "✅ {} completed: {} rows processed in {}ms (dry run)",
            summary.pipeline, summary.rows, summary.duration_ms
        ),
    }
}

fn write_summary(path: &Path, summaries: &[RunSummary]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "Run summary written");
    Ok(())
}
