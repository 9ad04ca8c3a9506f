use std::str::FromStr;

use common::error::ReportError;
use eyre::{Context, Result};
use regex::{Captures, Regex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::record::{Measurement, ReportRecord};

const SPEC_MARKER: &str = "'Access specification name";
const CONFIG_PATTERN: &str = r"^(\d+),(\d+),(\d+),(\d+),(\d+),(\d+),(\d+),(\d+)";
/// Target name, then manager, worker and disk counts.
const RESULT_PREFIX: &str = r"^ALL,All,.*?,\d,\d,\d,";
const RESULT_FIELDS: usize = 17;
/// Lines between the access specification config and the `ALL` results line.
const SKIPPED_LINES: usize = 3;

struct Patterns {
    config: Regex,
    result: Regex,
}

impl Patterns {
    fn new() -> Result<Self> {
        let decimals = vec![r"(\d+\.\d+)"; RESULT_FIELDS].join(",");
        Ok(Self {
            config: Regex::new(CONFIG_PATTERN)?,
            result: Regex::new(&format!("{RESULT_PREFIX}{decimals}"))?,
        })
    }
}

fn capture<T: FromStr>(caps: &Captures, idx: usize) -> Option<T> {
    caps.get(idx)?.as_str().parse().ok()
}

/// Walks an Iometer result report and yields one [`ReportRecord`] per access specification.
///
/// Each block starts at a `'Access specification name` line and is consumed in a fixed order:
/// name line, header, config line, three ignored lines, `ALL,All,` results line. Lines outside
/// of blocks are skipped. Nothing beyond the current line is buffered.
pub struct ReportReader<R> {
    reader: R,
    line: String,
    line_no: usize,
    block: usize,
    patterns: Patterns,
}

impl<R: AsyncBufRead + Unpin> ReportReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            reader,
            line: String::new(),
            line_no: 0,
            block: 0,
            patterns: Patterns::new()?,
        })
    }

    /// Number of blocks started so far.
    pub fn blocks(&self) -> usize {
        self.block
    }

    async fn advance(&mut self) -> Result<bool> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .await
            .context("Read result file")?;
        if read == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        let trimmed = self.line.trim_end_matches(['\r', '\n']).len();
        self.line.truncate(trimmed);
        Ok(true)
    }

    async fn expect_line(&mut self, expected: &'static str) -> Result<()> {
        if self.advance().await? {
            Ok(())
        } else {
            Err(ReportError::Truncated {
                block: self.block,
                expected,
            }
            .into())
        }
    }

    fn mismatch(&self, expected: &'static str) -> ReportError {
        ReportError::Format {
            block: self.block,
            line: self.line_no,
            expected,
            found: self.line.clone(),
        }
    }

    pub async fn next_record(&mut self) -> Result<Option<ReportRecord>> {
        loop {
            if !self.advance().await? {
                return Ok(None);
            }
            if self.line.starts_with(SPEC_MARKER) {
                break;
            }
        }
        self.block += 1;

        const NAME: &str = "an access specification name followed by a comma";
        self.expect_line(NAME).await?;
        let name = match self.line.split_once(',') {
            Some((name, _)) => name.to_owned(),
            None => return Err(self.mismatch(NAME).into()),
        };

        self.expect_line("the access specification header").await?;

        const CONFIG: &str = "eight comma separated integers";
        self.expect_line(CONFIG).await?;
        let (transfer_size, read_percent, random_percent) = self
            .patterns
            .config
            .captures(&self.line)
            .and_then(|caps| {
                Some((
                    capture(&caps, 1)?,
                    capture(&caps, 3)?,
                    capture(&caps, 4)?,
                ))
            })
            .ok_or_else(|| self.mismatch(CONFIG))?;

        for _ in 0..SKIPPED_LINES {
            self.expect_line("the results section").await?;
        }

        const RESULT: &str = "an ALL,All results line with 17 decimal fields";
        self.expect_line(RESULT).await?;
        let record = self
            .patterns
            .result
            .captures(&self.line)
            .and_then(|caps| {
                let field = |idx| capture::<Measurement>(&caps, idx);
                Some(ReportRecord {
                    name,
                    transfer_size,
                    read_percent,
                    random_percent,
                    total_iops: field(1)?,
                    total_read_iops: field(2)?,
                    total_write_iops: field(3)?,
                    total_mbps: field(4)?,
                    total_read_mbps: field(5)?,
                    total_write_mbps: field(6)?,
                    total_avg_response_time: field(12)?,
                    total_avg_read_response_time: field(13)?,
                    total_avg_write_response_time: field(14)?,
                })
            })
            .ok_or_else(|| self.mismatch(RESULT))?;

        Ok(Some(record))
    }
}
