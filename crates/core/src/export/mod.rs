//! Statement export to JSON and CSV.
//!
//! JSON is the serde form of the document, pretty-printed, with decimals as
//! strings. CSV starts with a header block naming the statement type,
//! period and standard, followed by `section, account_number,
//! account_name, amount` rows for every line item and then the totals.

pub mod error;
pub mod rows;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

pub use error::ExportError;
pub use rows::{ExportHeader, ExportRow, Tabular};

/// Output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Header block plus rows.
    Csv,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

/// Writes any serializable document as pretty JSON.
pub fn write_json<T: Serialize + ?Sized, W: Write>(document: &T, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, document)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes a statement document as CSV.
pub fn write_csv<T: Tabular + ?Sized, W: Write>(document: &T, writer: W) -> Result<(), ExportError> {
    let header = document.export_header();
    let mut rows = Vec::new();
    document.line_rows("", &mut rows);
    document.total_rows("", &mut rows);

    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    csv.write_record(["Financial Statement Export"])?;
    csv.write_record(["Type:", header.statement_type.as_str()])?;
    csv.write_record(["Period:", header.period.as_str()])?;
    if let Some(standard) = &header.standard {
        csv.write_record(["Standard:", standard.as_str()])?;
    }
    csv.write_record([""])?;
    csv.write_record(["section", "account_number", "account_name", "amount"])?;
    for row in &rows {
        csv.write_record([
            row.section.as_str(),
            row.account_number.as_str(),
            row.account_name.as_str(),
            row.amount.to_string().as_str(),
        ])?;
    }
    csv.flush()?;

    debug!(statement = %header.statement_type, rows = rows.len(), "Wrote CSV export");
    Ok(())
}

/// Writes a statement document in `format`.
pub fn write<T: Tabular + ?Sized, W: Write>(
    document: &T,
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => write_json(document, writer),
        ExportFormat::Csv => write_csv(document, writer),
    }
}

/// Writes a statement document to a file, replacing any existing file.
pub fn write_to_file<T: Tabular + ?Sized>(
    document: &T,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write(document, format, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), %format, "Exported statement");
    Ok(())
}
