use chrono::{DateTime, Utc};
use crm_core_api::domain::{EntryStatus, HistoryEntry};
use serde::{Deserialize, Serialize};

/// One status/remarks snapshot in an entry's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntryModel {
    pub status: EntryStatus,
    pub remarks: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntryModel {
    pub fn new(status: EntryStatus, remarks: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            status,
            remarks: remarks.into(),
            timestamp,
        }
    }
}

impl From<&HistoryEntryModel> for HistoryEntry {
    fn from(model: &HistoryEntryModel) -> Self {
        HistoryEntry {
            status: model.status,
            remarks: model.remarks.clone(),
            timestamp: model.timestamp,
        }
    }
}

/// Append-only, insertion-ordered history owned by a single entry.
///
/// There is no way to remove, reorder or edit a recorded snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<HistoryEntryModel>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Rebuilds a history from stored snapshots already in insertion order
    pub fn from_stored(entries: Vec<HistoryEntryModel>) -> Self {
        Self(entries)
    }

    pub fn append(&mut self, entry: HistoryEntryModel) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntryModel> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntryModel> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[HistoryEntryModel] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntryModel;
    type IntoIter = std::slice::Iter<'a, HistoryEntryModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
