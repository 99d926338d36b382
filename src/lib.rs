use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;

use csv::ReaderBuilder;
use tracing::{debug, info};

mod config;
mod encoding;
mod error;
mod sql_generator;
mod utils;

pub use config::Config;
pub use encoding::{
    Conversion, EncodingGuesser, SniffingGuesser, decode, detect_and_convert, read_source,
};
pub use error::{Csv2PgError, Result};
pub use sql_generator::{
    DEFAULT_LOAD_OPTIONS, generate_create_table, generate_load_statement, render_statements,
};
pub use utils::{CONVERTED_PREFIX, converted_path, derive_table_name};

/// reads the first csv record as the list of column names. data rows are never touched.
pub fn read_header<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?;
    Ok(headers.iter().map(String::from).collect())
}

/// what a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// present when the source was transcoded first.
    pub conversion: Option<Conversion>,
    pub statements: String,
    pub output: PathBuf,
}

/// the whole pipeline: transcode, read the header, generate both statements and write them
/// to `<ddl-base>.sql`. nothing is written when the source is missing or undecodable.
pub fn run(config: &Config, guesser: &dyn EncodingGuesser) -> Result<RunOutcome> {
    run_with_report(config, guesser, |_| {})
}

/// like [`run`], but hands the conversion to `on_convert` as soon as the utf-8 copy is on
/// disk, before any later step can fail.
pub fn run_with_report<F>(
    config: &Config,
    guesser: &dyn EncodingGuesser,
    mut on_convert: F,
) -> Result<RunOutcome>
where
    F: FnMut(&Conversion),
{
    let table_name = config.table_name();
    info!("building statements for table {}", table_name);

    let (conversion, source_path, text) = if config.convert {
        let conversion = detect_and_convert(&config.filename, guesser)?;
        on_convert(&conversion);
        let text = fs::read_to_string(&conversion.path)?;
        let source = conversion.path.to_string_lossy().into_owned();
        (Some(conversion), source, text)
    } else {
        let bytes = read_source(&config.filename)?;
        let text = decode(&config.filename, &bytes, "utf-8")?;
        (None, config.filename.clone(), text)
    };

    let columns = read_header(Cursor::new(text))?;
    debug!("header has {} columns", columns.len());

    let statements = render_statements(
        table_name,
        config.pk_column(),
        &columns,
        &source_path,
        config.load_options(),
    );

    let output = config.output_path();
    fs::write(&output, &statements)?;
    info!("wrote statements to {}", output.display());

    Ok(RunOutcome {
        conversion,
        statements,
        output,
    })
}
