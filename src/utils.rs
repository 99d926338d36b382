use std::path::{Path, PathBuf};

/// prefix given to the transcoded copy of the source file.
pub const CONVERTED_PREFIX: &str = "csv2pg-";

/// returns everything before the first '.', or the whole string when there is none.
pub fn derive_table_name(path: &str) -> &str {
    match path.find('.') {
        Some(loc) => &path[..loc],
        None => path,
    }
}

/// places `csv2pg-<file name>` in the same directory the given path string points at.
pub fn converted_path(path: &str) -> PathBuf {
    let source = Path::new(path);
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let converted = format!("{CONVERTED_PREFIX}{file_name}");

    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(converted),
        _ => PathBuf::from(converted),
    }
}
