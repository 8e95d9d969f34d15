//! Parsing uploaded bytes and files into a `DataFrame`.

use std::fmt;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::json::read_json;

/// Largest upload accepted by [`load_bytes`] (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Rows sampled for CSV schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Tsv,
    Json,
}

impl DataFormat {
    /// Resolves a file extension (case-insensitive, leading dot optional).
    pub fn from_extension(extension: &str) -> Result<Self> {
        let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Resolves the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an uploaded byte buffer using the parser selected by `extension`.
///
/// # Errors
///
/// - [`IngestError::UnsupportedFormat`] for extensions other than csv/tsv/json
/// - [`IngestError::EmptyUpload`] / [`IngestError::FileTooLarge`] for the size checks
/// - [`IngestError::Parse`] when the content does not parse
pub fn load_bytes(bytes: &[u8], extension: &str) -> Result<DataFrame> {
    let format = DataFormat::from_extension(extension)?;
    if bytes.is_empty() {
        return Err(IngestError::EmptyUpload);
    }
    let size = bytes.len() as u64;
    if size > MAX_UPLOAD_BYTES {
        return Err(IngestError::FileTooLarge {
            size,
            max_size: MAX_UPLOAD_BYTES,
        });
    }
    let content = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let df = match format {
        DataFormat::Csv => read_delimited(content, b',', format)?,
        DataFormat::Tsv => read_delimited(content, b'\t', format)?,
        DataFormat::Json => read_json(content)?,
    };
    info!(
        format = %format,
        bytes = size,
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok(df)
}

/// Reads a file from disk and parses it according to its extension.
pub fn load_path(path: &Path) -> Result<DataFrame> {
    let format = DataFormat::from_path(path)?;
    debug!(path = %path.display(), format = %format, "reading table file");
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or_default();
    load_bytes(&bytes, extension)
}

fn read_delimited(content: &[u8], separator: u8, format: DataFormat) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .map_parse_options(|options| options.with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(content.to_vec()))
        .finish()
        .map_err(|e| IngestError::Parse {
            format,
            message: e.to_string(),
        })
}

/// Writes the frame as comma-separated text with a header row.
pub fn write_csv<W: Write>(df: &DataFrame, writer: W) -> Result<()> {
    let mut frame = df.clone();
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(())
}

/// Writes the frame to a CSV file, replacing any existing file.
pub fn write_csv_path(df: &DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(df, file)?;
    debug!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}
