use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser};
use common::{
    config::{GeneratorConfig, Parameter, ParameterSource},
    error::ConfigError,
    logging,
};
use tracing::debug;

const LOG_TARGETS: &[&str] = &["iometer_spec_gen", "generator", "common"];

/// Generates an Iometer specification file based on the values provided.
///
/// Every combination of transfer size, random percentage and read percentage becomes one
/// access specification.
#[derive(Parser)]
#[command(
    version,
    after_help = "The camelCase spellings (--fileName, --readPercentValues, \
                  --transferSizeIteration, ...) are also accepted. They take two leading \
                  dashes, not one."
)]
struct Cli {
    /// Output specification file
    #[arg(short, long, alias = "fileName", default_value = "iometerSpec.icf")]
    file_name: PathBuf,
    #[command(flatten)]
    random: RandomPercentArgs,
    #[command(flatten)]
    transfer: TransferSizeArgs,
    #[command(flatten)]
    read: ReadPercentArgs,
    /// Extra tracing directives, e.g. `generator=debug`
    #[arg(short, long)]
    log: Vec<String>,
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct RandomPercentArgs {
    /// Random access percentages (0-100)
    #[arg(
        long,
        alias = "randomPercentValues",
        num_args = 1..,
        value_name = "VALUE",
        allow_negative_numbers = true
    )]
    random_percent_values: Option<Vec<i64>>,
    /// Random access percentages from START to END, advancing by STEP
    #[arg(
        long,
        alias = "randomPercentIteration",
        num_args = 3,
        value_names = ["START", "END", "STEP"],
        allow_negative_numbers = true
    )]
    random_percent_iteration: Option<Vec<i64>>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TransferSizeArgs {
    /// Transfer sizes in kilobytes (1-131072)
    #[arg(
        long,
        alias = "transferSizeValues",
        num_args = 1..,
        value_name = "VALUE",
        allow_negative_numbers = true
    )]
    transfer_size_values: Option<Vec<i64>>,
    /// Transfer sizes from START to END kilobytes, doubling each time
    #[arg(
        long,
        alias = "transferSizeIteration",
        num_args = 2,
        value_names = ["START", "END"],
        allow_negative_numbers = true
    )]
    transfer_size_iteration: Option<Vec<i64>>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ReadPercentArgs {
    /// Read percentages (0-100)
    #[arg(
        long,
        alias = "readPercentValues",
        num_args = 1..,
        value_name = "VALUE",
        allow_negative_numbers = true
    )]
    read_percent_values: Option<Vec<i64>>,
    /// Read percentages from START to END, advancing by STEP
    #[arg(
        long,
        alias = "readPercentIteration",
        num_args = 3,
        value_names = ["START", "END", "STEP"],
        allow_negative_numbers = true
    )]
    read_percent_iteration: Option<Vec<i64>>,
}

impl Cli {
    fn config(&self) -> Result<GeneratorConfig, ConfigError> {
        Ok(GeneratorConfig {
            file_name: self.file_name.clone(),
            transfer_size: ParameterSource::from_args(
                Parameter::TransferSize,
                self.transfer.transfer_size_values.clone(),
                self.transfer.transfer_size_iteration.clone(),
            )?,
            random_percent: ParameterSource::from_args(
                Parameter::RandomPercent,
                self.random.random_percent_values.clone(),
                self.random.random_percent_iteration.clone(),
            )?,
            read_percent: ParameterSource::from_args(
                Parameter::ReadPercent,
                self.read.read_percent_values.clone(),
                self.read.read_percent_iteration.clone(),
            )?,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();
    let _guard = match logging::init(LOG_TARGETS, &args.log, args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.config() {
        Ok(config) => generator::generate(&config).await,
        Err(err) => Err(err.into()),
    };
    match result {
        Ok(summary) => {
            println!("\n");
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("{err:?}");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
