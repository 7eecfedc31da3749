//! Text export of a raw record set.
//!
//! Formats come in two shapes: line-oriented ones that emit a fixed
//! header followed by one line per record, and whole-document ones that
//! render the set in a single transform. Line-oriented output always uses
//! CRLF terminators, independent of platform.

use thiserror::Error;

use crate::record::{RecordSet, VariantRecord};

/// Errors raised while exporting a record set.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested format is not one of `csv`, `snplist`, `json`.
    #[error("unsupported export format: {format}")]
    UnsupportedFormat { format: String },
    #[error("failed to encode records as JSON")]
    Json(#[from] serde_json::Error),
}

enum Framing {
    Lines {
        header: &'static str,
        line: fn(&str, &VariantRecord) -> String,
    },
    Whole(fn(&RecordSet) -> Result<String, ExportError>),
}

fn framing(format: &str) -> Option<Framing> {
    match format {
        "csv" => Some(Framing::Lines {
            header: "rsid,chromosome,genotype\r\n",
            line: csv_line,
        }),
        "snplist" => Some(Framing::Lines {
            header: "",
            line: snplist_line,
        }),
        "json" => Some(Framing::Whole(json_document)),
        _ => None,
    }
}

fn csv_line(id: &str, record: &VariantRecord) -> String {
    format!("{id},{},{}\r\n", record.chromosome, record.genotype)
}

fn snplist_line(id: &str, _record: &VariantRecord) -> String {
    format!("{id}\r\n")
}

fn json_document(records: &RecordSet) -> Result<String, ExportError> {
    Ok(serde_json::to_string(records)?)
}

/// Render `records` in the named format, in record insertion order.
///
/// Unknown format names fail with [`ExportError::UnsupportedFormat`] and
/// produce no output.
pub fn serialize_records(records: &RecordSet, format: &str) -> Result<String, ExportError> {
    let Some(framing) = framing(format) else {
        return Err(ExportError::UnsupportedFormat {
            format: format.to_string(),
        });
    };

    tracing::debug!(format = format, records = records.len(), "exporting record set");

    match framing {
        Framing::Lines { header, line } => {
            let mut out = String::with_capacity(header.len() + records.len() * 24);
            out.push_str(header);
            for (id, record) in records.iter() {
                out.push_str(&line(id, record));
            }
            Ok(out)
        }
        Framing::Whole(document) => document(records),
    }
}
