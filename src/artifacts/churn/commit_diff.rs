//! Per-file line statistics
//!
//! A `CommitDiff` is the unit every part of the churn pipeline exchanges:
//! providers produce one per commit, the merge engine combines several into
//! one, and the reporter consumes the final aggregate.
//!
//! ## Invariant
//!
//! Records are strictly ascending by path (raw byte order), so no path
//! appears twice. Every consumer relies on this ordering, which is why the
//! only way to build a `CommitDiff` from arbitrary records is
//! [`CommitDiff::try_from_records`].

use crate::artifacts::churn::error::{ChurnError, ChurnResult};
use crate::artifacts::churn::repo_path::RepoPath;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Line insertions and deletions for a single file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct FileChurn {
    #[new(into)]
    pub path: RepoPath,
    pub insertions: u64,
    pub deletions: u64,
}

impl FileChurn {
    fn absorb(&mut self, other: &FileChurn) {
        self.insertions += other.insertions;
        self.deletions += other.deletions;
    }
}

/// Path-sorted, duplicate-free list of file statistics
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CommitDiff {
    records: Vec<FileChurn>,
}

impl CommitDiff {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a diff from records a producer claims are sorted by path.
    ///
    /// Fails with `UnsortedDiff` on the first record whose path does not sort
    /// strictly after its predecessor. Records are never re-sorted.
    pub fn try_from_records(records: Vec<FileChurn>) -> ChurnResult<Self> {
        if let Some(pair) = records.windows(2).find(|pair| pair[0].path >= pair[1].path) {
            return Err(ChurnError::UnsortedDiff {
                previous: pair[0].path.to_string(),
                path: pair[1].path.to_string(),
            });
        }

        Ok(Self { records })
    }

    /// Caller guarantees strict ascending order.
    pub(crate) fn from_sorted(records: Vec<FileChurn>) -> Self {
        debug_assert!(records.windows(2).all(|pair| pair[0].path < pair[1].path));
        Self { records }
    }

    pub fn records(&self) -> &[FileChurn] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FileChurn> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: impl AsRef<[u8]>) -> Option<&FileChurn> {
        self.records
            .binary_search_by(|record| record.path.as_bytes().cmp(path.as_ref()))
            .ok()
            .map(|index| &self.records[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileChurn> {
        self.records.iter()
    }

    /// Keep only the records matching `predicate`; order is preserved.
    pub fn retain(&mut self, predicate: impl FnMut(&FileChurn) -> bool) {
        self.records.retain(predicate);
    }

    pub fn total_insertions(&self) -> u64 {
        self.records.iter().map(|record| record.insertions).sum()
    }

    pub fn total_deletions(&self) -> u64 {
        self.records.iter().map(|record| record.deletions).sum()
    }

    /// Fold a record into the last one when both carry the same path.
    ///
    /// Used by the merge engine, which emits records in ascending order.
    pub(crate) fn push_or_absorb(records: &mut Vec<FileChurn>, record: FileChurn) {
        match records.last_mut() {
            Some(last) if last.path == record.path => last.absorb(&record),
            _ => records.push(record),
        }
    }
}

impl<'a> IntoIterator for &'a CommitDiff {
    type Item = &'a FileChurn;
    type IntoIter = std::slice::Iter<'a, FileChurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for CommitDiff {
    type Item = FileChurn;
    type IntoIter = std::vec::IntoIter<FileChurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
