use std::fs;
use std::io;
use std::path::PathBuf;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use tracing::{debug, info};

use crate::error::{Csv2PgError, Result};
use crate::utils::converted_path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// encoding_rs maps these to windows-1252, which differs from latin-1 in 0x80..=0x9f.
const LATIN1_LABELS: &[&str] = &["iso-8859-1", "iso8859-1", "iso_8859-1", "latin1", "l1"];

/// guesses the byte encoding of a file's content, answering with a mime-style label
/// such as "utf-8" or "iso-8859-1".
pub trait EncodingGuesser {
    fn guess_encoding(&self, bytes: &[u8]) -> String;
}

impl<F> EncodingGuesser for F
where
    F: Fn(&[u8]) -> String,
{
    fn guess_encoding(&self, bytes: &[u8]) -> String {
        self(bytes)
    }
}

/// content sniffer in the spirit of `file --mime-encoding`.
//
// a bom wins outright. otherwise the bytes are tested in this order:
// 1. binary: nul bytes with no bom to explain them.
// 2. us-ascii: every byte is 7-bit.
// 3. utf-8: the whole buffer is valid utf-8.
// 4. iso-8859-1: anything else, since every byte is valid latin-1.
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffingGuesser;

impl EncodingGuesser for SniffingGuesser {
    fn guess_encoding(&self, bytes: &[u8]) -> String {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            let label = if encoding == UTF_16LE {
                "utf-16le"
            } else if encoding == UTF_16BE {
                "utf-16be"
            } else {
                "utf-8"
            };
            return label.to_string();
        }

        let label = if bytes.contains(&0) {
            "binary"
        } else if bytes.is_ascii() {
            "us-ascii"
        } else if std::str::from_utf8(bytes).is_ok() {
            "utf-8"
        } else {
            "iso-8859-1"
        };
        label.to_string()
    }
}

/// the outcome of transcoding a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// label reported by the guesser.
    pub encoding: String,
    /// where the utf-8 copy was written.
    pub path: PathBuf,
}

/// reads the whole source file, mapping a missing file to `SourceNotFound`.
pub fn read_source(path: &str) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!("read {} bytes from {}", bytes.len(), path);
            Ok(bytes)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Csv2PgError::SourceNotFound {
            path: path.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// decodes `bytes` under `label`. utf-8 drops a leading bom; every other label is decoded
/// as-is. the guess is trusted, nothing checks it against the content.
pub fn decode(path: &str, bytes: &[u8], label: &str) -> Result<String> {
    let decode_error = || Csv2PgError::Decode {
        path: path.to_string(),
        encoding: label.to_string(),
    };

    let label_key = label.trim().to_ascii_lowercase();
    if LATIN1_LABELS.contains(&label_key.as_str()) {
        // every byte is its own code point
        return Ok(bytes.iter().map(|&b| b as char).collect());
    }

    let encoding = Encoding::for_label(label_key.as_bytes()).ok_or_else(decode_error)?;
    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    } else {
        bytes
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(decode_error)
}

/// writes a bom-less utf-8 copy of `path` to `csv2pg-<file name>` beside it.
pub fn detect_and_convert(path: &str, guesser: &dyn EncodingGuesser) -> Result<Conversion> {
    let bytes = read_source(path)?;
    let label = guesser.guess_encoding(&bytes);
    info!("detected encoding {} for {}", label, path);

    let text = decode(path, &bytes, &label)?;
    let target = converted_path(path);
    fs::write(&target, text.as_bytes())?;
    debug!("wrote {} utf-8 bytes to {}", text.len(), target.display());

    Ok(Conversion {
        encoding: label,
        path: target,
    })
}
