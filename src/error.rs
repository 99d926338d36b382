use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Csv2PgError>;

#[derive(Debug, Error)]
pub enum Csv2PgError {
    /// The source csv file does not exist.
    #[error("File {path} not found")]
    SourceNotFound { path: String },

    /// The bytes cannot be read under the detected (or assumed) encoding.
    #[error(
        "File {path} could not be decoded as {encoding}. \
         Try re-encoding it to UTF-8 with iconv."
    )]
    Decode { path: String, encoding: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
