use super::record::{Record, RecordId, RecordKey};

/// Ordered collection of records in order of entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<Record>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Removes the first record matching `key`, returning it with its former position.
    pub fn remove_matching(&mut self, key: &RecordKey) -> Option<(usize, Record)> {
        let index = self.records.iter().position(|record| key.matches(record))?;
        Some((index, self.records.remove(index)))
    }

    pub fn remove_by_id(&mut self, id: RecordId) -> Option<(usize, Record)> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some((index, self.records.remove(index)))
    }

    pub(crate) fn pop(&mut self) -> Option<Record> {
        self.records.pop()
    }

    pub(crate) fn reinsert(&mut self, index: usize, record: Record) {
        let index = index.min(self.records.len());
        self.records.insert(index, record);
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
