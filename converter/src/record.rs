use std::{fmt, num::ParseFloatError, str::FromStr};

use serde::{Serialize, Serializer};

/// Column names of the delimited output, in row order.
pub const COLUMNS: [&str; 13] = [
    "spec_name",
    "transfer_size",
    "read_percent",
    "random_percent",
    "total_iops",
    "total_read_iops",
    "total_write_iops",
    "total_mbps",
    "total_read_mbps",
    "total_write_mbps",
    "total_avg_response_time",
    "total_avg_read_response_time",
    "total_avg_write_response_time",
];

/// A decimal read from the report. Keeps the text exactly as Iometer wrote it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    text: String,
    value: f64,
}

impl Measurement {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Measurement {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            value: s.parse()?,
            text: s.to_owned(),
        })
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Summary of one access specification run, taken from its `ALL` results line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    #[serde(rename = "spec_name")]
    pub name: String,
    pub transfer_size: u32,
    pub read_percent: u32,
    pub random_percent: u32,
    pub total_iops: Measurement,
    pub total_read_iops: Measurement,
    pub total_write_iops: Measurement,
    pub total_mbps: Measurement,
    pub total_read_mbps: Measurement,
    pub total_write_mbps: Measurement,
    pub total_avg_response_time: Measurement,
    pub total_avg_read_response_time: Measurement,
    pub total_avg_write_response_time: Measurement,
}
