use std::process::ExitCode;

use clap::Parser;
use csv2pg::{Config, Conversion, SniffingGuesser, run_with_report};
use tracing_subscriber::EnvFilter;

/// Generates a PostgreSQL table definition and \copy statement from a CSV header.
#[derive(Parser, Debug)]
#[command(name = "csv2pg", version, about, long_about = None)]
struct Cli {
    /// CSV file to be loaded into PostgreSQL table
    filename: String,

    /// Table where the CSV file is copied (defaults to the filename up to the first '.')
    #[arg(short, long)]
    table: Option<String>,

    /// Base filename of the generated statements, written as <DDL>.sql
    #[arg(short, long)]
    ddl: Option<String>,

    /// System generated primary key column
    #[arg(short, long)]
    pk: Option<String>,

    /// Options appended to the \copy statement [default: DELIMITER ',' CSV HEADER]
    #[arg(short, long, value_name = "OPTIONS")]
    optcp: Option<String>,

    /// Read the file as UTF-8 instead of detecting and transcoding its encoding
    #[arg(long, default_value_t = false)]
    no_convert: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            filename: cli.filename,
            table: cli.table,
            ddl: cli.ddl,
            pk: cli.pk,
            optcp: cli.optcp,
            convert: !cli.no_convert,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::from(Cli::parse());

    let report = |conversion: &Conversion| {
        println!("Detected encoding: {}", conversion.encoding);
        println!("Converted file: {}", conversion.path.display());
    };

    match run_with_report(&config, &SniffingGuesser, report) {
        Ok(outcome) => {
            println!("{}", outcome.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
