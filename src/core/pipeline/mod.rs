//! Pipeline orchestration and run reporting

pub mod runner;
pub mod summary;

pub use runner::Pipeline;
pub use summary::RunSummary;

use crate::config::{LogmaskConfig, PipelineKind};
use crate::domain::Result;

/// Run every profile in order
///
/// A failure in one pipeline is returned in its slot and does not stop the
/// ones after it.
pub fn run_all(config: &LogmaskConfig) -> Vec<(PipelineKind, Result<RunSummary>)> {
    PipelineKind::ALL
        .iter()
        .map(|&kind| (kind, Pipeline::new(config, kind).and_then(|p| p.run())))
        .collect()
}
