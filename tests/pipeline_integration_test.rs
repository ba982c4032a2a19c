//! Integration tests for the end-to-end pipelines
//!
//! Input workbooks are produced with the crate's own xlsx writer, run
//! through a pipeline, and read back from disk.

use logmask::adapters::spreadsheet::{DatasetReader, DatasetWriter, SpreadsheetReader, XlsxWriter};
use logmask::config::{LogmaskConfig, PipelineKind};
use logmask::core::pipeline::{run_all, Pipeline};
use logmask::domain::{Cell, Dataset, LogmaskError};
use logmask::masking::{CaseMode, MISSING_SENTINEL};
use std::path::Path;
use tempfile::TempDir;

fn iam_sheet() -> Dataset {
    Dataset::from_rows(
        vec![
            "时间".to_string(),
            "用户名".to_string(),
            "源IP".to_string(),
            "目标IP".to_string(),
            "详情".to_string(),
        ],
        vec![
            vec![
                Cell::text("2024-05-01 08:00:00"),
                Cell::text("Alice (admin)"),
                Cell::text("10.20.30.40"),
                Cell::text("172.16.5.9(CN)"),
                Cell::text("login from 10.20.30.40 mac 00:11:22:33:44:55"),
            ],
            vec![
                Cell::text("2024-05-01 08:05:00"),
                Cell::text("x"),
                Cell::Missing,
                Cell::text("8.8.8.8"),
                Cell::Missing,
            ],
            vec![
                Cell::text("2024-05-01 08:10:00"),
                Cell::Missing,
                Cell::text("192.168.0.1"),
                Cell::Missing,
                Cell::text("no identifiers here"),
            ],
        ],
    )
    .unwrap()
}

fn sip_sheet() -> Dataset {
    Dataset::from_rows(
        vec![
            "源地址".to_string(),
            "目的地址".to_string(),
            "原始日志".to_string(),
        ],
        vec![vec![
            Cell::text("10.20.30.40"),
            Cell::text("1.1.1.1"),
            Cell::text("SrcIP=10.20.30.40 DstIP=1.1.1.1 action=block via 9.9.9.9"),
        ]],
    )
    .unwrap()
}

fn config_in(dir: &Path) -> LogmaskConfig {
    let mut config = LogmaskConfig::default();
    for kind in PipelineKind::ALL {
        let profile = config.pipelines.get_mut(kind);
        profile.input = dir.join(format!("{kind}.xlsx"));
        profile.output = dir.join(format!("{kind}_masked_final.xlsx"));
    }
    config
}

fn column<'a>(dataset: &'a Dataset, name: &str) -> Vec<&'a Cell> {
    dataset.column(name).expect(name).collect()
}

#[test]
fn test_iam_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    XlsxWriter::new()
        .write(&iam_sheet(), &config.pipelines.iam.input)
        .unwrap();

    let summary = Pipeline::new(&config, PipelineKind::Iam).unwrap().run().unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.masked_columns.len(), 3);
    assert!(summary.skipped_columns.is_empty());
    assert_eq!(summary.output.as_deref(), Some(config.pipelines.iam.output.as_path()));

    let out = SpreadsheetReader::new().read(&config.pipelines.iam.output).unwrap();
    assert_eq!(
        out.headers(),
        &[
            "时间",
            "详情",
            "用户_ID",
            "用户_display",
            "源地址_ID",
            "源地址_display",
            "目的地址_ID",
            "目的地址_display",
        ]
    );
    assert_eq!(out.row_count(), 3);

    // Row order is preserved
    let times: Vec<String> = column(&out, "时间")
        .iter()
        .map(|c| c.as_text().unwrap().into_owned())
        .collect();
    assert_eq!(
        times,
        vec!["2024-05-01 08:00:00", "2024-05-01 08:05:00", "2024-05-01 08:10:00"]
    );

    let hasher = config.masking.hasher(CaseMode::Lowercase);
    assert_eq!(*column(&out, "用户_ID")[0], Cell::text(hasher.hash_str("alice")));
    assert_eq!(*column(&out, "用户_display")[0], Cell::text("A***"));
    assert_eq!(*column(&out, "用户_display")[1], Cell::text("anonymous"));
    assert_eq!(*column(&out, "源地址_ID")[1], Cell::text(MISSING_SENTINEL));
    assert_eq!(*column(&out, "源地址_display")[1], Cell::text(MISSING_SENTINEL));
    assert_eq!(*column(&out, "目的地址_display")[0], Cell::text("172.16.5.*"));

    let ip_id = hasher.hash_str("10.20.30.40");
    assert_eq!(*column(&out, "源地址_ID")[0], Cell::text(ip_id.as_str()));
    assert_eq!(
        *column(&out, "详情")[0],
        Cell::Text(format!(
            "login from {} mac MAC_{}",
            ip_id,
            hasher.hash_str("00:11:22:33:44:55")
        ))
    );
    assert_eq!(*column(&out, "详情")[1], Cell::Missing);
    assert_eq!(*column(&out, "详情")[2], Cell::text("no identifiers here"));
}

#[test]
fn test_sip_pipeline_correlates_with_iam() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let writer = XlsxWriter::new();
    writer.write(&iam_sheet(), &config.pipelines.iam.input).unwrap();
    writer.write(&sip_sheet(), &config.pipelines.sip.input).unwrap();

    let results = run_all(&config);
    assert_eq!(results.len(), 2);
    for (kind, result) in &results {
        assert!(result.is_ok(), "{kind} failed: {result:?}");
    }

    let reader = SpreadsheetReader::new();
    let iam = reader.read(&config.pipelines.iam.output).unwrap();
    let sip = reader.read(&config.pipelines.sip.output).unwrap();

    // The same address gets the same identifier in both outputs
    let iam_id = column(&iam, "源地址_ID")[0].clone();
    let sip_id = column(&sip, "源地址_ID")[0].clone();
    assert_eq!(iam_id, sip_id);

    let log = column(&sip, "原始日志")[0].as_text().unwrap().into_owned();
    let iam_id = iam_id.as_text().unwrap().into_owned();
    assert!(log.starts_with(&format!("SrcIP={iam_id} DstIP=")));
    assert!(log.ends_with(" action=block via 9.9.9.9"));
    assert!(!sip.has_column("设备地址_ID"));
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let err = Pipeline::new(&config, PipelineKind::Sip).unwrap().run().unwrap_err();

    assert!(matches!(err, LogmaskError::Spreadsheet(_)));
    assert!(err.to_string().contains("sip.xlsx"));
    assert!(!config.pipelines.sip.output.exists());
}

#[test]
fn test_corrupt_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    std::fs::write(&config.pipelines.iam.input, b"not a workbook").unwrap();

    let err = Pipeline::new(&config, PipelineKind::Iam).unwrap().run().unwrap_err();

    assert!(matches!(err, LogmaskError::Spreadsheet(ref e) if e.is_load_failure()));
    assert!(!config.pipelines.iam.output.exists());
}

#[test]
fn test_run_all_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    XlsxWriter::new()
        .write(&sip_sheet(), &config.pipelines.sip.input)
        .unwrap();

    let results = run_all(&config);

    assert!(results[0].1.is_err());
    assert_eq!(results[0].0, PipelineKind::Iam);
    assert!(results[1].1.is_ok());
    assert!(config.pipelines.sip.output.exists());
}

#[test]
fn test_dry_run_does_not_write() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.application.dry_run = true;
    XlsxWriter::new()
        .write(&sip_sheet(), &config.pipelines.sip.input)
        .unwrap();

    let summary = Pipeline::new(&config, PipelineKind::Sip).unwrap().run().unwrap();

    assert!(summary.is_dry_run());
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.total_replacements(), 2);
    assert!(!config.pipelines.sip.output.exists());
}
