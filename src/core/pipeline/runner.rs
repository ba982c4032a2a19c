//! Pipeline runner - load, mask, rewrite and write one spreadsheet
//!
//! A [`Pipeline`] binds a profile from the configuration to a reader and a
//! writer. Every run builds a fresh [`Dataset`]; nothing is shared between
//! runs except the hasher's salt.

use crate::adapters::spreadsheet::{DatasetReader, DatasetWriter, SpreadsheetReader, XlsxWriter};
use crate::config::{LogmaskConfig, PipelineConfig, PipelineKind};
use crate::core::pipeline::summary::RunSummary;
use crate::domain::{Dataset, LogmaskError, Result};
use crate::masking::{ColumnMaskOutcome, ColumnMasker, EmbeddedValueRewriter, RewriteStats};
use std::time::Instant;

/// One configured masking pipeline
pub struct Pipeline {
    kind: PipelineKind,
    profile: PipelineConfig,
    masker: ColumnMasker,
    rewriter: EmbeddedValueRewriter,
    reader: Box<dyn DatasetReader>,
    writer: Box<dyn DatasetWriter>,
    dry_run: bool,
}

impl Pipeline {
    /// Build the pipeline for `kind` from the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns a pattern error if a rule set fails to compile.
    pub fn new(config: &LogmaskConfig, kind: PipelineKind) -> Result<Self> {
        let profile = config.pipeline(kind).clone();
        let hasher = config.masking.hasher(profile.case_mode);

        let masker = ColumnMasker::new(hasher.clone(), profile.column_rules())
            .with_suffixes(&config.masking.id_suffix, &config.masking.display_suffix)
            .with_anonymous_placeholder(&config.masking.anonymous_placeholder);
        let rewriter = EmbeddedValueRewriter::for_kind(hasher, profile.rule_set)?;

        Ok(Self {
            kind,
            profile,
            masker,
            rewriter,
            reader: Box::new(SpreadsheetReader::new()),
            writer: Box::new(XlsxWriter::new()),
            dry_run: config.application.dry_run,
        })
    }

    /// Replace the file adapters
    pub fn with_io(
        mut self,
        reader: Box<dyn DatasetReader>,
        writer: Box<dyn DatasetWriter>,
    ) -> Self {
        self.reader = reader;
        self.writer = writer;
        self
    }

    /// Skip the final write
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Mask and rewrite a dataset in memory
    ///
    /// # Errors
    ///
    /// Returns a validation error if a derived column would overwrite its
    /// own source.
    pub fn transform(
        &self,
        dataset: &mut Dataset,
    ) -> Result<(ColumnMaskOutcome, Option<RewriteStats>)> {
        let outcome = self.masker.apply(dataset)?;
        let rewrite = match self.profile.free_text_column.as_deref() {
            Some(column) => self.rewriter.apply(dataset, column),
            None => None,
        };
        Ok((outcome, rewrite))
    }

    /// Execute the pipeline
    ///
    /// 1. Load the first worksheet of the input file
    /// 2. Replace each sensitive column with identifier and display columns
    /// 3. Rewrite embedded values in the free-text column
    /// 4. Write the output workbook (skipped in dry-run mode)
    ///
    /// Nothing is written if loading or masking fails.
    pub fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(self.kind, self.profile.input.clone());

        crate::log_pipeline_start!(self.kind, self.profile.input, self.dry_run);

        let mut dataset = self.reader.read(&self.profile.input).map_err(|e| {
            crate::log_error_with_context!(e, "Failed to load input");
            e
        })?;
        let rows = dataset.row_count();

        let (outcome, rewrite) = self.transform(&mut dataset)?;
        if dataset.row_count() != rows {
            return Err(LogmaskError::Validation(format!(
                "row count changed during masking ({} -> {})",
                rows,
                dataset.row_count()
            )));
        }

        if self.dry_run {
            tracing::info!(pipeline = %self.kind, "Dry run, output not written");
        } else {
            self.writer
                .write(&dataset, &self.profile.output)
                .map_err(|e| {
                    crate::log_error_with_context!(e, "Failed to write output");
                    e
                })?;
            summary.output = Some(self.profile.output.clone());
        }

        summary.rows = rows;
        summary.masked_columns = outcome.masked;
        summary.skipped_columns = outcome.skipped;
        summary.rewrite = rewrite;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, SpreadsheetError};
    use crate::masking::MISSING_SENTINEL;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    struct MemoryReader(Dataset);

    impl DatasetReader for MemoryReader {
        fn read(&self, _path: &Path) -> Result<Dataset> {
            Ok(self.0.clone())
        }
    }

    struct FailingReader;

    impl DatasetReader for FailingReader {
        fn read(&self, path: &Path) -> Result<Dataset> {
            Err(SpreadsheetError::OpenFailed {
                path: path.to_path_buf(),
                reason: "No such file or directory".to_string(),
            }
            .into())
        }
    }

    #[derive(Clone, Default)]
    struct CapturingWriter(Rc<RefCell<Vec<Dataset>>>);

    impl DatasetWriter for CapturingWriter {
        fn write(&self, dataset: &Dataset, _path: &Path) -> Result<()> {
            self.0.borrow_mut().push(dataset.clone());
            Ok(())
        }
    }

    fn sip_sheet() -> Dataset {
        Dataset::from_rows(
            vec![
                "时间".to_string(),
                "源地址".to_string(),
                "目的地址".to_string(),
                "原始日志".to_string(),
            ],
            vec![
                vec![
                    Cell::text("2024-05-01 10:00:00"),
                    Cell::text("10.20.30.40"),
                    Cell::Missing,
                    Cell::text("SrcIP=10.0.0.1 DstIP=10.0.0.2 via 9.9.9.9"),
                ],
                vec![
                    Cell::text("2024-05-01 10:00:05"),
                    Cell::text("192.168.1.7(CN)"),
                    Cell::text("8.8.8.8"),
                    Cell::Number(42.0),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_run_masks_and_writes() {
        let config = LogmaskConfig::default();
        let writer = CapturingWriter::default();
        let pipeline = Pipeline::new(&config, PipelineKind::Sip)
            .unwrap()
            .with_io(Box::new(MemoryReader(sip_sheet())), Box::new(writer.clone()));

        let summary = pipeline.run().unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.masked_columns.len(), 2);
        assert_eq!(summary.skipped_columns, vec!["设备地址".to_string()]);
        assert_eq!(summary.output, Some(config.pipelines.sip.output.clone()));

        let rewrite = summary.rewrite.as_ref().unwrap();
        assert_eq!(rewrite.replacements["src_ip"], 1);
        assert_eq!(rewrite.replacements["dst_ip"], 1);

        let written = writer.0.borrow();
        assert_eq!(written.len(), 1);
        let out = &written[0];
        assert_eq!(
            out.headers(),
            &[
                "时间",
                "原始日志",
                "源地址_ID",
                "源地址_display",
                "目的地址_ID",
                "目的地址_display",
            ]
        );
        assert_eq!(out.rows()[0][3], Cell::text("10.20.30.*"));
        assert_eq!(out.rows()[0][4], Cell::text(MISSING_SENTINEL));
        assert_eq!(out.rows()[1][3], Cell::text("192.168.1.*"));
        assert_eq!(out.rows()[1][1], Cell::Number(42.0));

        let log = out.rows()[0][1].as_text().unwrap();
        assert!(log.starts_with("SrcIP="));
        assert!(log.ends_with(" via 9.9.9.9"));
        assert!(!log.contains("10.0.0.1"));
    }

    #[test]
    fn test_dry_run_skips_write() {
        let config = LogmaskConfig::default();
        let writer = CapturingWriter::default();
        let pipeline = Pipeline::new(&config, PipelineKind::Sip)
            .unwrap()
            .with_io(Box::new(MemoryReader(sip_sheet())), Box::new(writer.clone()))
            .with_dry_run(true);

        let summary = pipeline.run().unwrap();

        assert!(summary.is_dry_run());
        assert_eq!(summary.rows, 2);
        assert!(writer.0.borrow().is_empty());
    }

    #[test]
    fn test_load_failure_writes_nothing() {
        let config = LogmaskConfig::default();
        let writer = CapturingWriter::default();
        let pipeline = Pipeline::new(&config, PipelineKind::Iam)
            .unwrap()
            .with_io(Box::new(FailingReader), Box::new(writer.clone()));

        let err = pipeline.run().unwrap_err();

        assert!(matches!(err, LogmaskError::Spreadsheet(ref e) if e.is_load_failure()));
        assert!(writer.0.borrow().is_empty());
    }

    #[test]
    fn test_transform_without_free_text_column() {
        let mut config = LogmaskConfig::default();
        config.pipelines.iam.free_text_column = None;
        let pipeline = Pipeline::new(&config, PipelineKind::Iam).unwrap();

        let mut dataset = Dataset::from_rows(
            vec!["用户名".to_string(), "详情".to_string()],
            vec![vec![Cell::text("Alice (admin)"), Cell::text("from 10.0.0.1")]],
        )
        .unwrap();
        let (outcome, rewrite) = pipeline.transform(&mut dataset).unwrap();

        assert_eq!(outcome.masked.len(), 1);
        assert!(rewrite.is_none());
        assert_eq!(dataset.rows()[0][0], Cell::text("from 10.0.0.1"));
        assert_eq!(dataset.rows()[0][2], Cell::text("A***"));
    }
}
