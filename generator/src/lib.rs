//! Builds Iometer access specification files from ranges of test parameters.

use std::{fmt, path::PathBuf};

use common::config::{GeneratorConfig, Parameter};
use eyre::{Context, Result};
use tokio::fs::{canonicalize, write};
use tracing::{debug, info};

pub mod params;
pub mod render;

pub use params::materialize;
pub use render::{SpecificationEntry, entries, render};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of access specifications written
    pub count: usize,
    /// Absolute path of the written file
    pub path: PathBuf,
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Specifications Generated: {}", self.count)?;
        write!(f, "File Saved To: {}", self.path.display())
    }
}

/// Validates all three parameters, then writes the specification file.
///
/// Nothing is written if any parameter is invalid.
pub async fn generate(config: &GeneratorConfig) -> Result<GenerationSummary> {
    let transfer_sizes = materialize(Parameter::TransferSize, &config.transfer_size)?;
    let random_percents = materialize(Parameter::RandomPercent, &config.random_percent)?;
    let read_percents = materialize(Parameter::ReadPercent, &config.read_percent)?;
    debug!(
        "Transfer sizes {transfer_sizes:?}, random {random_percents:?}, read {read_percents:?}"
    );

    let count = transfer_sizes.len() * random_percents.len() * read_percents.len();
    let document = render(entries(&transfer_sizes, &random_percents, &read_percents));
    write(&config.file_name, document)
        .await
        .context(format!("Write specification file {}", config.file_name.display()))?;

    let path = canonicalize(&config.file_name)
        .await
        .context("Resolve specification file path")?;
    info!("Generated {count} access specifications in {}", path.display());
    Ok(GenerationSummary { count, path })
}
