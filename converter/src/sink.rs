use std::path::Path;

use common::{
    config::{ConverterConfig, OutputMode},
    util::{quoted_fields, quoted_row},
};
use eyre::{Context, Result};
use tokio::{
    fs::File,
    io::{AsyncWriteExt, BufWriter},
};

use crate::record::{COLUMNS, ReportRecord};

/// Destination for converted records. Records are written as soon as they are parsed.
#[async_trait::async_trait]
pub trait RecordSink: Send {
    fn name(&self) -> &'static str;

    async fn write(&mut self, record: &ReportRecord) -> Result<()>;

    async fn finish(self: Box<Self>) -> Result<()>;
}

pub async fn open_sink(config: &ConverterConfig) -> Result<Box<dyn RecordSink>> {
    match config.mode {
        OutputMode::Csv => Ok(Box::new(CsvSink::create(&config.output_file).await?)),
        #[cfg(feature = "sqlite")]
        OutputMode::Sqlite => Ok(Box::new(sqlite::SqliteSink::create(&config.output_file)?)),
        #[cfg(not(feature = "sqlite"))]
        OutputMode::Sqlite => Err(common::error::ConfigError::DatabaseUnsupported.into()),
    }
}

/// Header line, then every row prefixed by a line feed. No trailing newline.
pub struct CsvSink {
    file: BufWriter<File>,
}

impl CsvSink {
    pub async fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .await
            .context(format!("Create output file {}", path.display()))?;
        let mut file = BufWriter::new(file);
        file.write_all(quoted_fields(COLUMNS)?.as_bytes()).await?;
        Ok(Self { file })
    }
}

#[async_trait::async_trait]
impl RecordSink for CsvSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn write(&mut self, record: &ReportRecord) -> Result<()> {
        let row = quoted_row(record)?;
        self.file.write_all(b"\n").await?;
        self.file.write_all(row.as_bytes()).await?;
        Ok(())
    }

    async fn finish(mut self: Box<Self>) -> Result<()> {
        self.file.flush().await.context("Flush output file")?;
        Ok(())
    }
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    use std::path::Path;

    use eyre::{Context, Result};
    use rusqlite::{Connection, params};

    use super::RecordSink;
    use crate::record::ReportRecord;

    const CREATE_TABLE: &str = "create table iostats ( name varchar(100), transfer_size integer, \
        read_percent integer, random_percent integer, total_iops real, total_read_iops real, \
        total_write_iops real, total_mbps real, total_read_mbps real, total_write_mbps real, \
        total_avg_response_time real, total_avg_read_response_time real, \
        total_avg_write_response_time real);";

    const INSERT: &str = "INSERT INTO iostats(name, transfer_size, read_percent, random_percent, \
        total_iops, total_read_iops, total_write_iops, total_mbps, total_read_mbps, \
        total_write_mbps, total_avg_response_time, total_avg_read_response_time, \
        total_avg_write_response_time) VALUES(?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)";

    /// Inserts into the `iostats` table, committing after every record.
    pub struct SqliteSink {
        conn: Connection,
    }

    impl SqliteSink {
        pub fn create(path: &Path) -> Result<Self> {
            let conn = Connection::open(path)
                .context(format!("Open output database {}", path.display()))?;
            conn.execute(CREATE_TABLE, [])
                .context("Create iostats table")?;
            Ok(Self { conn })
        }
    }

    #[async_trait::async_trait]
    impl RecordSink for SqliteSink {
        fn name(&self) -> &'static str {
            "sqlite"
        }

        async fn write(&mut self, record: &ReportRecord) -> Result<()> {
            let tx = self.conn.transaction()?;
            tx.execute(
                INSERT,
                params![
                    record.name,
                    record.transfer_size,
                    record.read_percent,
                    record.random_percent,
                    record.total_iops.value(),
                    record.total_read_iops.value(),
                    record.total_write_iops.value(),
                    record.total_mbps.value(),
                    record.total_read_mbps.value(),
                    record.total_write_mbps.value(),
                    record.total_avg_response_time.value(),
                    record.total_avg_read_response_time.value(),
                    record.total_avg_write_response_time.value(),
                ],
            )
            .context(format!("Insert record {}", record.name))?;
            tx.commit()?;
            Ok(())
        }

        async fn finish(self: Box<Self>) -> Result<()> {
            self.conn
                .close()
                .map_err(|(_, err)| err)
                .context("Close output database")?;
            Ok(())
        }
    }
}
