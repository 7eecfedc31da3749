//! Parsing of direct-to-consumer genotype text exports.
//!
//! Accepts the common tab- or space-delimited layout
//! (`rsid  chromosome  position  genotype`, position ignored) and the
//! comma-delimited layout this crate's own csv export produces
//! (`rsid,chromosome,genotype`). Comment lines and the csv header are
//! skipped. The platform missing markers `--` and `00` are stored as the
//! `??` no-call sentinel; everything else is kept verbatim.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::Context;
use thiserror::Error;

use crate::record::{NO_CALL, RecordSet, VariantRecord};

const CSV_HEADER: &str = "rsid,chromosome,genotype";

/// Iterator over genotype rows in a raw text export.
pub struct Reader<R> {
    inner: R,
    line: u64,
    buf: String,
}

impl<R> Reader<R>
where
    R: BufRead,
{
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R> Iterator for Reader<R>
where
    R: BufRead,
{
    type Item = Result<(String, VariantRecord), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    let trimmed = self.buf.trim_end_matches(&['\n', '\r'][..]);
                    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == CSV_HEADER {
                        continue;
                    }

                    return Some(parse_row(trimmed).map_err(|kind| ParseError {
                        line: self.line,
                        raw: trimmed.to_string(),
                        kind,
                    }));
                }
                Err(e) => {
                    return Some(Err(ParseError {
                        line: self.line,
                        raw: String::new(),
                        kind: ParseErrorKind::Io(e),
                    }));
                }
            }
        }
    }
}

/// Errors that can arise while parsing a genotype row.
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: u64,
    pub raw: String,
    #[source]
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("expected three or four delimited fields, found {0}")]
    FieldCount(usize),
    #[error("missing variant identifier")]
    MissingId,
    #[error("missing chromosome field")]
    MissingChromosome,
    #[error("missing genotype field")]
    MissingGenotype,
}

fn parse_row(line: &str) -> Result<(String, VariantRecord), ParseErrorKind> {
    let fields = split_fields(line);

    let (id, chromosome, genotype) = match fields.len() {
        4 => (fields[0], fields[1], fields[3]),
        3 => (fields[0], fields[1], fields[2]),
        n => return Err(ParseErrorKind::FieldCount(n)),
    };

    if id.is_empty() {
        return Err(ParseErrorKind::MissingId);
    }
    if chromosome.is_empty() {
        return Err(ParseErrorKind::MissingChromosome);
    }
    if genotype.is_empty() {
        return Err(ParseErrorKind::MissingGenotype);
    }

    let genotype = match genotype {
        "--" | "00" => NO_CALL.to_string(),
        other => other.to_string(),
    };

    Ok((
        id.to_string(),
        VariantRecord {
            chromosome: chromosome.to_string(),
            genotype,
        },
    ))
}

fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// Collect a reader into a record set.
///
/// A repeated rsID replaces the earlier record but keeps its position.
pub fn read_records<R>(reader: Reader<R>) -> Result<RecordSet, ParseError>
where
    R: BufRead,
{
    let mut records = RecordSet::new();
    for row in reader {
        let (id, record) = row?;
        records.insert(id, record);
    }
    Ok(records)
}

/// Load a genotype file from disk.
pub fn load_records<P>(path: P) -> anyhow::Result<RecordSet>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open genotype file {}", path.display()))?;
    let records = read_records(Reader::new(BufReader::new(file)))
        .with_context(|| format!("failed to parse genotype file {}", path.display()))?;

    tracing::info!(
        records = records.len(),
        path = %path.display(),
        "loaded genotype file",
    );

    Ok(records)
}
