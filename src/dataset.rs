//! The imported-file dataset: an immutable raw record set plus lazy
//! strand-normalized and summary views.

use std::borrow::Cow;
use std::sync::OnceLock;

use crate::export::{self, ExportError};
use crate::record::{RecordSet, VariantRecord};
use crate::strand::{StrandSource, flip_alleles};

const DEFAULT_NAME: &str = "Imported file";

/// One imported genotype file.
///
/// Owns its records for its whole lifetime and exposes no way to change
/// them. The normalized projection is recomputed on every read; the
/// no-call list is computed once and kept.
#[derive(Debug)]
pub struct Dataset<S> {
    id: String,
    name: String,
    records: RecordSet,
    strand: S,
    no_calls: OnceLock<Vec<String>>,
}

impl<S: StrandSource> Dataset<S> {
    /// Build a dataset from an identifier and a set of raw records.
    ///
    /// The records are stored as-is; genotype strings are not validated.
    /// An empty set is fine.
    pub fn new(id: impl Into<String>, records: RecordSet, strand: S) -> Self {
        Self {
            id: id.into(),
            name: DEFAULT_NAME.to_string(),
            records,
            strand,
            no_calls: OnceLock::new(),
        }
    }

    /// Replace the default display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, `"Imported file"` unless overridden.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw records, untouched by strand normalization.
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Raw lookup by rsID.
    pub fn get_raw(&self, id: &str) -> Option<&VariantRecord> {
        self.records.get(id)
    }

    /// Number of records in the file.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Strand-normalized lookup by rsID.
    ///
    /// Plus-strand records come back borrowed from the raw set;
    /// minus-strand records come back as a fresh copy with the genotype
    /// flipped to the plus strand. Writing to the copy (via
    /// [`Cow::to_mut`]) can never reach the raw record.
    ///
    /// The projection is recomputed on every call; nothing is cached at
    /// the per-key level.
    pub fn normalized(&self, id: &str) -> Option<Cow<'_, VariantRecord>> {
        self.records.get(id).map(|record| self.project(id, record))
    }

    /// All records through the normalized view, in raw insertion order.
    ///
    /// Yields exactly the ids present in the raw set.
    pub fn normalized_records(&self) -> impl Iterator<Item = (&str, Cow<'_, VariantRecord>)> {
        self.records
            .iter()
            .map(move |(id, record)| (id, self.project(id, record)))
    }

    fn project<'a>(&self, id: &str, record: &'a VariantRecord) -> Cow<'a, VariantRecord> {
        if !self.strand.is_minus_strand(id) {
            return Cow::Borrowed(record);
        }

        Cow::Owned(VariantRecord {
            chromosome: record.chromosome.clone(),
            genotype: flip_alleles(&record.genotype),
        })
    }

    /// rsIDs whose raw genotype is the no-call sentinel, in raw insertion
    /// order.
    ///
    /// Computed by a single scan on first access and cached for the life
    /// of the dataset; later calls return the same slice. The scan reads
    /// raw genotypes, never the normalized view.
    pub fn no_calls(&self) -> &[String] {
        self.no_calls.get_or_init(|| {
            self.records
                .iter()
                .filter(|(_, record)| record.is_no_call())
                .map(|(id, _)| id.to_string())
                .collect()
        })
    }

    /// Render the raw records in the named export format.
    ///
    /// See [`export::serialize_records`] for the recognized formats.
    /// Exports always carry the raw genotypes, so a written file
    /// round-trips losslessly; callers wanting strand-consistent output
    /// normalize first.
    pub fn serialize(&self, format: &str) -> Result<String, ExportError> {
        export::serialize_records(&self.records, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strand::MinusStrandTable;

    fn sample_records() -> RecordSet {
        [
            ("rs1".to_string(), VariantRecord::new("1", "AA")),
            ("rs2".to_string(), VariantRecord::new("2", "??")),
            ("rs3".to_string(), VariantRecord::new("3", "AG")),
        ]
        .into_iter()
        .collect()
    }

    fn minus(ids: &[&str]) -> MinusStrandTable {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn plus_strand_lookup_borrows_the_raw_record() {
        let dataset = Dataset::new("file", sample_records(), minus(&[]));
        let record = dataset.normalized("rs1").unwrap();
        assert!(matches!(record, Cow::Borrowed(_)));
        assert_eq!(record.genotype, "AA");
    }

    #[test]
    fn minus_strand_lookup_flips_a_copy() {
        let dataset = Dataset::new("file", sample_records(), minus(&["rs3"]));
        let record = dataset.normalized("rs3").unwrap();
        assert!(matches!(record, Cow::Owned(_)));
        assert_eq!(record.genotype, "TC");
        assert_eq!(record.chromosome, "3");
        assert_eq!(dataset.get_raw("rs3").unwrap().genotype, "AG");
    }

    #[test]
    fn absent_id_is_none() {
        let dataset = Dataset::new("file", sample_records(), minus(&[]));
        assert!(dataset.normalized("rs999").is_none());
    }

    #[test]
    fn normalized_records_walks_raw_order() {
        let dataset = Dataset::new("file", sample_records(), minus(&["rs1"]));
        let pairs: Vec<(&str, String)> = dataset
            .normalized_records()
            .map(|(id, record)| (id, record.genotype.clone()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("rs1", "TT".to_string()),
                ("rs2", "??".to_string()),
                ("rs3", "AG".to_string()),
            ]
        );
    }

    #[test]
    fn no_calls_are_cached() {
        let dataset = Dataset::new("file", sample_records(), minus(&[]));
        let first = dataset.no_calls();
        let second = dataset.no_calls();
        assert_eq!(first, ["rs2".to_string()]);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn default_name() {
        let dataset = Dataset::new("file", RecordSet::new(), minus(&[]));
        assert_eq!(dataset.name(), "Imported file");
        let named = Dataset::new("file", RecordSet::new(), minus(&[])).with_name("genome.txt");
        assert_eq!(named.name(), "genome.txt");
    }
}
