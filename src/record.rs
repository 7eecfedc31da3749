use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Genotype sentinel for a site the platform tested but could not call.
pub const NO_CALL: &str = "??";

/// A single genotyped site from an imported file.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct VariantRecord {
    pub chromosome: String,
    pub genotype: String,
}

impl VariantRecord {
    pub fn new(chromosome: impl Into<String>, genotype: impl Into<String>) -> Self {
        Self {
            chromosome: chromosome.into(),
            genotype: genotype.into(),
        }
    }

    pub fn is_no_call(&self) -> bool {
        self.genotype == NO_CALL
    }
}

/// Map from rsID to [`VariantRecord`] that iterates in insertion order.
///
/// Exports walk the set front to back, so the order records were inserted
/// in is the order they appear in every serialized output.
#[derive(Clone, Debug, Default)]
pub struct RecordSet {
    entries: Vec<(String, VariantRecord)>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&VariantRecord> {
        let slot = *self.index.get(id)?;
        Some(&self.entries[slot].1)
    }

    /// Insert a record, returning the previous one for the same id.
    ///
    /// An existing id keeps its position in the iteration order; a fresh
    /// id appends at the end.
    pub fn insert(&mut self, id: String, record: VariantRecord) -> Option<VariantRecord> {
        match self.index.get(&id) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, record)),
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, record));
                None
            }
        }
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantRecord)> {
        self.entries
            .iter()
            .map(|(id, record)| (id.as_str(), record))
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }
}

impl PartialEq for RecordSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for RecordSet {}

impl FromIterator<(String, VariantRecord)> for RecordSet {
    fn from_iter<I: IntoIterator<Item = (String, VariantRecord)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut records = Self::with_capacity(iter.size_hint().0);
        for (id, record) in iter {
            records.insert(id, record);
        }
        records
    }
}

impl Extend<(String, VariantRecord)> for RecordSet {
    fn extend<I: IntoIterator<Item = (String, VariantRecord)>>(&mut self, iter: I) {
        for (id, record) in iter {
            self.insert(id, record);
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = (&'a str, &'a VariantRecord);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a VariantRecord)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Serializes as a JSON object keyed by rsID, in insertion order.
impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}
