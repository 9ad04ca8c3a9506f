//! Converts Iometer result reports into flat per-test-case rows.

use common::{
    config::{ConverterConfig, OutputMode},
    error::ConfigError,
};
use eyre::{Context, Result};
use tokio::{
    fs::File,
    io::{AsyncBufRead, BufReader},
};
use tracing::{debug, info};

pub mod reader;
pub mod record;
pub mod sink;

pub use reader::ReportReader;
pub use record::{Measurement, ReportRecord};
pub use sink::{CsvSink, RecordSink, open_sink};

/// Checks that the output target can be used. Runs before the report is opened.
pub fn check_output(config: &ConverterConfig) -> Result<(), ConfigError> {
    if config.mode != OutputMode::Sqlite {
        return Ok(());
    }
    if !cfg!(feature = "sqlite") {
        return Err(ConfigError::DatabaseUnsupported);
    }
    if config.output_file.exists() {
        return Err(ConfigError::DatabaseExists(config.output_file.clone()));
    }
    Ok(())
}

/// Streams every record from `report` into `sink`. Returns the number of records written.
///
/// The sink is not finished, so callers can still inspect or close it.
pub async fn write_records<R>(report: R, sink: &mut dyn RecordSink) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut reader = ReportReader::new(report)?;
    let mut count = 0;
    while let Some(record) = reader.next_record().await? {
        debug!(
            "{}: {} bytes, {}% read, {}% random, {} IOPS",
            record.name,
            record.transfer_size,
            record.read_percent,
            record.random_percent,
            record.total_iops
        );
        sink.write(&record).await?;
        count += 1;
    }
    debug!("Read {} access specification blocks", reader.blocks());
    Ok(count)
}

/// Runs a full conversion. Output written before an error is left in place.
pub async fn convert(config: &ConverterConfig) -> Result<usize> {
    check_output(config)?;

    let input = File::open(&config.result_file).await.context(format!(
        "Failed to open result file {}",
        config.result_file.display()
    ))?;
    let mut sink = open_sink(config).await?;
    debug!("Writing {} output to {}", sink.name(), config.output_file.display());

    let count = write_records(BufReader::new(input), sink.as_mut()).await?;
    sink.finish().await?;

    info!(
        "Converted {count} test cases from {} to {}",
        config.result_file.display(),
        config.output_file.display()
    );
    Ok(count)
}
