use std::path::PathBuf;

use crate::sql_generator::DEFAULT_LOAD_OPTIONS;
use crate::utils::derive_table_name;

/// everything one run needs, fixed for the duration of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub filename: String,
    pub table: Option<String>,
    pub ddl: Option<String>,
    pub pk: Option<String>,
    pub optcp: Option<String>,
    /// transcode the source to utf-8 before reading its header.
    pub convert: bool,
}

impl Config {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            table: None,
            ddl: None,
            pk: None,
            optcp: None,
            convert: true,
        }
    }

    pub fn table_name(&self) -> &str {
        self.table
            .as_deref()
            .unwrap_or_else(|| derive_table_name(&self.filename))
    }

    /// `<ddl-base>.sql`, where the base falls back to the table name.
    pub fn output_path(&self) -> PathBuf {
        let base = self.ddl.as_deref().unwrap_or_else(|| self.table_name());
        PathBuf::from(format!("{}.sql", base))
    }

    pub fn load_options(&self) -> &str {
        self.optcp.as_deref().unwrap_or(DEFAULT_LOAD_OPTIONS)
    }

    pub fn pk_column(&self) -> Option<&str> {
        self.pk.as_deref()
    }
}
