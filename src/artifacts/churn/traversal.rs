//! Ancestry traversal with memoization
//!
//! Walks the commit DAG from one starting commit and folds every ancestor's
//! own diff into a single aggregate, counting each commit exactly once even
//! when it is reachable through several paths.
//!
//! ## Rules
//!
//! - a commit already visited in this traversal contributes nothing
//! - a root commit contributes its own diff against the empty tree
//! - an ordinary commit contributes its parent's aggregate plus its own diff
//! - a merge commit contributes only the merged aggregates of its parents;
//!   its own diff against any single parent is never fetched
//!
//! ## Algorithm
//!
//! The walk is a depth-first post-order traversal driven by an explicit stack
//! of frames instead of native recursion, so history depth is bounded by heap
//! memory rather than the thread's stack. Each frame collects the aggregates
//! of its parents; once all parents are done the frame is completed and its
//! result is handed to the frame below it.
//!
//! Commits are marked visited when they are entered, before any parent is
//! walked. The visited set lives in the `Traversal` value and is dropped with
//! it, so independent traversals never share state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut traversal = Traversal::new(&repository);
//! traversal.exclude(&release_commit)?;
//! let churn = traversal.aggregate(&head)?;
//! ```

use crate::artifacts::churn::commit_diff::CommitDiff;
use crate::artifacts::churn::error::ChurnResult;
use crate::artifacts::churn::history::HistoryGraph;
use crate::artifacts::churn::merge::merge;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Counters describing what a traversal did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Commits whose own diff was fetched and counted
    pub counted: usize,
    /// Merge commits walked through without counting their own diff
    pub merges: usize,
    /// Commits skipped because they had already been visited
    pub revisits: usize,
    /// Commits marked visited by `exclude`
    pub excluded: usize,
}

/// A commit whose parents are still being walked
#[derive(Debug)]
struct Frame {
    commit: ObjectId,
    parents: Vec<ObjectId>,
    next_parent: usize,
    inherited: Vec<CommitDiff>,
}

impl Frame {
    fn new(commit: ObjectId, parents: Vec<ObjectId>) -> Self {
        let inherited = Vec::with_capacity(parents.len());
        Frame {
            commit,
            parents,
            next_parent: 0,
            inherited,
        }
    }

    fn advance(&mut self) -> Option<ObjectId> {
        let parent = self.parents.get(self.next_parent).cloned();
        self.next_parent += 1;
        parent
    }
}

/// Per-invocation traversal context owning the visited set
#[derive(Debug)]
pub struct Traversal<G: HistoryGraph> {
    graph: G,
    visited: HashSet<ObjectId>,
    stats: TraversalStats,
}

impl<G: HistoryGraph> Traversal<G> {
    pub fn new(graph: G) -> Self {
        Traversal {
            graph,
            visited: HashSet::new(),
            stats: TraversalStats::default(),
        }
    }

    pub fn is_visited(&self, commit: &ObjectId) -> bool {
        self.visited.contains(commit)
    }

    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Mark `commit` and all of its ancestors as visited without fetching any
    /// diff, so a later `aggregate` treats them as already counted.
    pub fn exclude(&mut self, commit: &ObjectId) -> ChurnResult<()> {
        let mut pending = vec![commit.clone()];

        while let Some(oid) = pending.pop() {
            if !self.visited.insert(oid.clone()) {
                continue;
            }

            self.stats.excluded += 1;
            pending.extend(self.graph.parents(&oid)?);
        }

        debug!(commit = %commit, excluded = self.stats.excluded, "excluded ancestry");

        Ok(())
    }

    /// Aggregate churn over the not-yet-visited ancestry of `commit`.
    ///
    /// Calling this again for a commit already visited in the same traversal
    /// yields an empty diff.
    #[tracing::instrument(level = "debug", skip(self), fields(commit = %commit))]
    pub fn aggregate(&mut self, commit: &ObjectId) -> ChurnResult<CommitDiff> {
        let Some(start) = self.enter(commit)? else {
            return Ok(CommitDiff::empty());
        };
        let mut stack = vec![start];

        while let Some(frame) = stack.last_mut() {
            if let Some(parent) = frame.advance() {
                if let Some(parent_frame) = self.enter(&parent)? {
                    stack.push(parent_frame);
                }
                continue;
            }

            let Some(frame) = stack.pop() else {
                break;
            };
            let result = self.complete(frame)?;

            match stack.last_mut() {
                Some(child) => child.inherited.push(result),
                None => {
                    debug!(files = result.len(), stats = ?self.stats, "aggregation finished");
                    return Ok(result);
                }
            }
        }

        Ok(CommitDiff::empty())
    }

    fn enter(&mut self, commit: &ObjectId) -> ChurnResult<Option<Frame>> {
        if !self.visited.insert(commit.clone()) {
            trace!(commit = %commit, "already visited");
            self.stats.revisits += 1;
            return Ok(None);
        }

        let parents = self.graph.parents(commit)?;
        trace!(commit = %commit, parents = parents.len(), "entered");

        Ok(Some(Frame::new(commit.clone(), parents)))
    }

    fn complete(&mut self, frame: Frame) -> ChurnResult<CommitDiff> {
        let Frame {
            commit,
            parents,
            mut inherited,
            ..
        } = frame;

        match parents.len() {
            0 => {
                self.stats.counted += 1;
                self.graph.diff(&commit)
            }
            1 => {
                self.stats.counted += 1;
                inherited.push(self.graph.diff(&commit)?);
                Ok(merge(inherited))
            }
            _ => {
                self.stats.merges += 1;
                Ok(merge(inherited))
            }
        }
    }
}

/// Aggregate churn for `commit` with a fresh traversal context.
pub fn aggregate<G: HistoryGraph>(graph: G, commit: &ObjectId) -> ChurnResult<CommitDiff> {
    Traversal::new(graph).aggregate(commit)
}
