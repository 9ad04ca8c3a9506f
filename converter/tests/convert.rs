use std::path::{Path, PathBuf};

use common::{
    config::{ConverterConfig, OutputMode},
    error::{ConfigError, ReportError},
};
use tokio::fs::{read_to_string, write};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/results.csv")
}

fn config(result_file: PathBuf, output_file: PathBuf, mode: OutputMode) -> ConverterConfig {
    ConverterConfig {
        result_file,
        output_file,
        mode,
    }
}

#[tokio::test]
async fn converts_report_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.csv");

    let count = converter::convert(&config(fixture(), output.clone(), OutputMode::Csv))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let contents = read_to_string(&output).await.unwrap();
    let lines: Vec<_> = contents.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        concat!(
            r#""Trans:4; Rand:0; Read:100","4096","100","0","5123.456789","5123.456789","0.000000","#,
            r#""20.013503","20.013503","0.000000","0.195102","0.000000","12.842000""#
        )
    );
    assert_eq!(
        lines[2],
        concat!(
            r#""Trans:8; Rand:50; Read:70","8192","70","50","1410.220000","987.154000","423.066000","#,
            r#""11.017344","7.712141","3.305203","0.708871","0.000000","45.001200""#
        )
    );
}

#[tokio::test]
async fn csv_output_is_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.csv");
    write(&output, "stale contents\nthat must go\n").await.unwrap();

    converter::convert(&config(fixture(), output.clone(), OutputMode::Csv))
        .await
        .unwrap();
    let contents = read_to_string(&output).await.unwrap();
    assert!(contents.starts_with(r#""spec_name""#));
    assert!(!contents.contains("stale"));
}

#[tokio::test]
async fn missing_report_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    let err = converter::convert(&config(
        missing,
        dir.path().join("result.csv"),
        OutputMode::Csv,
    ))
    .await
    .unwrap_err();
    assert!(format!("{err:#}").starts_with("Failed to open result file"));
}

#[tokio::test]
async fn malformed_report_names_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("broken.csv");
    let report_text = read_to_string(fixture()).await.unwrap();
    let broken = report_text.replacen(
        "ALL,All,Trans:8; Rand:50; Read:70,1,1,1,1410.220000",
        "ALL,All,Trans:8; Rand:50; Read:70,1,1,1,n/a",
        1,
    );
    write(&report, broken).await.unwrap();

    let err = converter::convert(&config(
        report,
        dir.path().join("result.csv"),
        OutputMode::Csv,
    ))
    .await
    .unwrap_err();
    match err.downcast_ref::<ReportError>() {
        Some(ReportError::Format { block, line, .. }) => {
            assert_eq!(*block, 2);
            assert_eq!(*line, 32);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn converts_report_to_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.db");

    let count = converter::convert(&config(fixture(), output.clone(), OutputMode::Sqlite))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let conn = rusqlite::Connection::open(&output).unwrap();
    let (name, read, rand, write_iops, avg_write): (String, i64, i64, f64, f64) = conn
        .query_row(
            "SELECT name, read_percent, random_percent, total_write_iops, \
             total_avg_write_response_time FROM iostats WHERE transfer_size = 8192",
            [],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            },
        )
        .unwrap();
    assert_eq!(name, "Trans:8; Rand:50; Read:70");
    assert_eq!((read, rand), (70, 50));
    assert_eq!(write_iops, 423.066);
    assert_eq!(avg_write, 45.0012);
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn existing_database_fails_before_reading_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("result.db");
    write(&output, "").await.unwrap();

    let err = converter::convert(&config(
        dir.path().join("does-not-exist.csv"),
        output,
        OutputMode::Sqlite,
    ))
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::DatabaseExists(_))
    ));
}

#[cfg(not(feature = "sqlite"))]
#[tokio::test]
async fn sqlite_mode_requires_the_feature() {
    let dir = tempfile::tempdir().unwrap();
    let err = converter::convert(&config(
        fixture(),
        dir.path().join("result.db"),
        OutputMode::Sqlite,
    ))
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::DatabaseUnsupported)
    ));
}
