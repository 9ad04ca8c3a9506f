use std::{ops::RangeInclusive, path::PathBuf};

use crate::error::ConfigError;

/// Largest transfer size Iometer accepts, in kilobytes.
pub const MAX_TRANSFER_SIZE_KB: i64 = 131_072;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Quoted, comma separated text
    Csv,
    /// One `iostats` table in a SQLite database
    Sqlite,
}

#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub result_file: PathBuf,
    pub output_file: PathBuf,
    pub mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    TransferSize,
    RandomPercent,
    ReadPercent,
}

impl Parameter {
    pub fn domain(&self) -> RangeInclusive<i64> {
        match self {
            Parameter::TransferSize => 1..=MAX_TRANSFER_SIZE_KB,
            Parameter::RandomPercent | Parameter::ReadPercent => 0..=100,
        }
    }

    pub fn values_flag(&self) -> &'static str {
        match self {
            Parameter::TransferSize => "--transfer-size-values",
            Parameter::RandomPercent => "--random-percent-values",
            Parameter::ReadPercent => "--read-percent-values",
        }
    }

    pub fn iteration_flag(&self) -> &'static str {
        match self {
            Parameter::TransferSize => "--transfer-size-iteration",
            Parameter::RandomPercent => "--random-percent-iteration",
            Parameter::ReadPercent => "--read-percent-iteration",
        }
    }

    /// How a range for this parameter advances. Transfer sizes double, percentages add a step.
    fn takes_step(&self) -> bool {
        !matches!(self, Parameter::TransferSize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Add(i64),
    Double,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSource {
    Values(Vec<i64>),
    Range { start: i64, end: i64, step: Step },
}

impl ParameterSource {
    /// Builds a source from the two mutually exclusive command line forms.
    pub fn from_args(
        parameter: Parameter,
        values: Option<Vec<i64>>,
        iteration: Option<Vec<i64>>,
    ) -> Result<Self, ConfigError> {
        match (values, iteration) {
            (Some(values), None) => Ok(ParameterSource::Values(values)),
            (None, Some(iteration)) => match (parameter.takes_step(), iteration.as_slice()) {
                (true, &[start, end, step]) => Ok(ParameterSource::Range {
                    start,
                    end,
                    step: Step::Add(step),
                }),
                (false, &[start, end]) => Ok(ParameterSource::Range {
                    start,
                    end,
                    step: Step::Double,
                }),
                _ => Err(ConfigError::InvalidRange {
                    flag: parameter.iteration_flag(),
                    given: format!("{iteration:?}"),
                }),
            },
            _ => Err(ConfigError::ModeConflict {
                values_flag: parameter.values_flag(),
                iteration_flag: parameter.iteration_flag(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub file_name: PathBuf,
    pub transfer_size: ParameterSource,
    pub random_percent: ParameterSource,
    pub read_percent: ParameterSource,
}
