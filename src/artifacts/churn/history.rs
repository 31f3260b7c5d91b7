//! History providers
//!
//! The traversal never talks to git directly. It consumes a `HistoryGraph`,
//! which answers two questions about a commit: who its parents are, and what
//! its own change set looks like. Implementations must be idempotent and
//! side-effect free from the traversal's point of view; any caching they do
//! is their own business.

use crate::artifacts::churn::commit_diff::CommitDiff;
use crate::artifacts::churn::error::ChurnResult;
use crate::artifacts::log::path_filter::PathFilter;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Commit graph with per-commit diffs
pub trait HistoryGraph {
    /// Ordered parent list: empty for a root, two or more for a merge.
    ///
    /// Fails with `UnknownCommit` when `commit` cannot be resolved.
    fn parents(&self, commit: &ObjectId) -> ChurnResult<Vec<ObjectId>>;

    /// The commit's own changes against its first parent, or against the
    /// empty tree for a root commit.
    ///
    /// Binary entries are already filtered out and the records are sorted by
    /// path. Fails with `MalformedDiff` when that cannot be guaranteed.
    fn diff(&self, commit: &ObjectId) -> ChurnResult<CommitDiff>;
}

impl<G: HistoryGraph + ?Sized> HistoryGraph for &G {
    fn parents(&self, commit: &ObjectId) -> ChurnResult<Vec<ObjectId>> {
        (**self).parents(commit)
    }

    fn diff(&self, commit: &ObjectId) -> ChurnResult<CommitDiff> {
        (**self).diff(commit)
    }
}

/// Turns a user supplied revision (`HEAD`, `main~2`, an abbreviated id, ...)
/// into a commit id
pub trait RevisionResolver {
    fn resolve(&self, revision: &str) -> anyhow::Result<ObjectId>;
}

/// Graph decorator restricting every commit diff to the paths a filter accepts
#[derive(Debug, Clone, new)]
pub struct FilteredGraph<G> {
    inner: G,
    filter: PathFilter,
}

impl<G: HistoryGraph> HistoryGraph for FilteredGraph<G> {
    fn parents(&self, commit: &ObjectId) -> ChurnResult<Vec<ObjectId>> {
        self.inner.parents(commit)
    }

    fn diff(&self, commit: &ObjectId) -> ChurnResult<CommitDiff> {
        let mut diff = self.inner.diff(commit)?;
        diff.retain(|record| self.filter.matches(&record.path));
        Ok(diff)
    }
}
