use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use common::{
    config::{ConverterConfig, OutputMode},
    logging,
};
use tracing::debug;

const LOG_TARGETS: &[&str] = &["iometer_convert", "converter", "common"];

/// Converts an Iometer result file to either a CSV file or SQLite database.
#[derive(Parser)]
#[command(
    version,
    after_help = "The camelCase spellings --outputFile and --SQLite are also accepted. \
                  They take two leading dashes, not one."
)]
struct Cli {
    /// Iometer result file
    result_file: PathBuf,
    /// Where to write the converted records
    #[arg(short, long, alias = "outputFile", default_value = "result.csv")]
    output_file: PathBuf,
    /// Write a SQLite database instead of CSV. The file must not exist yet
    #[arg(long, alias = "SQLite", default_value_t = false)]
    sqlite: bool,
    /// Extra tracing directives, e.g. `converter=debug`
    #[arg(short, long)]
    log: Vec<String>,
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> ConverterConfig {
        ConverterConfig {
            result_file: self.result_file.clone(),
            output_file: self.output_file.clone(),
            mode: if self.sqlite {
                OutputMode::Sqlite
            } else {
                OutputMode::Csv
            },
        }
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

    let config = args.config();
    match converter::convert(&config).await {
        Ok(count) => {
            println!(
                "Converted {count} test case(s) to {}",
                config.output_file.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("{err:?}");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
