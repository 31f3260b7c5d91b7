//! K-way merge of path-sorted diffs
//!
//! Combines any number of `CommitDiff`s into one, summing the counts of files
//! that appear in several inputs. This is the merge phase of an external
//! merge sort: one cursor per input, and at every step the smallest path
//! among all cursors is emitted after absorbing every input that shares it.
//!
//! The cursors sit in a min-heap keyed by `(path, input index)`, so each
//! step costs `O(log k)` and the whole merge is a single pass over the total
//! input size. Nothing is re-sorted; the inputs' ordering is what makes the
//! output ordered.

use crate::artifacts::churn::commit_diff::{CommitDiff, FileChurn};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Head record of one input, tagged with the input it came from
#[derive(Debug)]
struct Cursor {
    record: FileChurn,
    source: usize,
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cursor {}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.record
            .path
            .cmp(&other.record.path)
            .then(self.source.cmp(&other.source))
    }
}

/// Merge zero or more path-sorted diffs into one.
///
/// - no inputs yield an empty diff
/// - a single input is returned unchanged
/// - a path present in `k` inputs yields one record whose counts are the sum
///   over exactly those `k` inputs
pub fn merge(lists: Vec<CommitDiff>) -> CommitDiff {
    let mut lists = lists
        .into_iter()
        .filter(|list| !list.is_empty())
        .collect::<Vec<_>>();

    if lists.len() <= 1 {
        return lists.pop().unwrap_or_default();
    }

    let capacity = lists.iter().map(CommitDiff::len).max().unwrap_or_default();
    let mut inputs = lists
        .into_iter()
        .map(|list| list.into_records().into_iter())
        .collect::<Vec<_>>();

    let mut heap = BinaryHeap::with_capacity(inputs.len());
    for (source, input) in inputs.iter_mut().enumerate() {
        if let Some(record) = input.next() {
            heap.push(Reverse(Cursor { record, source }));
        }
    }

    let mut merged = Vec::with_capacity(capacity);
    while let Some(Reverse(Cursor { record, source })) = heap.pop() {
        // equal paths pop back to back, so they fold into the last record
        CommitDiff::push_or_absorb(&mut merged, record);

        if let Some(next) = inputs[source].next() {
            heap.push(Reverse(Cursor {
                record: next,
                source,
            }));
        }
    }

    tracing::trace!(records = merged.len(), "merged diffs");

    CommitDiff::from_sorted(merged)
}
