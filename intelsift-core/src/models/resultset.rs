//! Result set accumulation.

use serde::{Deserialize, Serialize};

use super::record::IntelRecord;

/// The running collection of records for one batch.
///
/// Ordering is insertion order. No uniqueness constraint is enforced:
/// duplicate subject/source pairs may both appear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    records: Vec<IntelRecord>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single record.
    pub fn push(&mut self, record: impl Into<IntelRecord>) {
        self.records.push(record.into());
    }

    /// Appends all records from an iterator.
    pub fn extend<I, R>(&mut self, records: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<IntelRecord>,
    {
        self.records.extend(records.into_iter().map(Into::into));
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &IntelRecord> {
        self.records.iter()
    }

    /// Returns the union of column names across all records.
    ///
    /// Column order is first-seen order, so a tabular sink produces stable
    /// headers for a given batch.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = Vec::new();
        for record in &self.records {
            for (column, _) in record.fields() {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        columns
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a IntelRecord;
    type IntoIter = std::slice::Iter<'a, IntelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
