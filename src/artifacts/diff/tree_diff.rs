//! Tree-level comparison
//!
//! Two trees are compared entry by entry and every subtree that differs is
//! expanded, until only blob-like entries (files, symlinks, submodules) are
//! left. Paths are `/`-joined, so a [`ChangeSet`] iterates in the order git
//! reports paths in.

use crate::areas::database::Database;
use crate::artifacts::churn::repo_path::RepoPath;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::collections::{BTreeMap, BTreeSet};

/// What happened to a single non-tree entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryChange {
    Added(DatabaseEntry),
    Deleted(DatabaseEntry),
    Modified {
        old: DatabaseEntry,
        new: DatabaseEntry,
    },
}

impl EntryChange {
    /// `None` when the entry is absent on both sides or did not change
    pub fn between(old: Option<DatabaseEntry>, new: Option<DatabaseEntry>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(EntryChange::Added(new)),
            (Some(old), None) => Some(EntryChange::Deleted(old)),
            (Some(old), Some(new)) if old != new => Some(EntryChange::Modified { old, new }),
            _ => None,
        }
    }

    pub fn old_entry(&self) -> Option<&DatabaseEntry> {
        match self {
            EntryChange::Deleted(old) | EntryChange::Modified { old, .. } => Some(old),
            EntryChange::Added(_) => None,
        }
    }

    pub fn new_entry(&self) -> Option<&DatabaseEntry> {
        match self {
            EntryChange::Added(new) | EntryChange::Modified { new, .. } => Some(new),
            EntryChange::Deleted(_) => None,
        }
    }
}

/// Changed non-tree entries keyed by their `/`-joined path.
///
/// Keys sort in plain byte order, the same order git reports paths in.
pub type ChangeSet = BTreeMap<RepoPath, EntryChange>;

/// A pair of trees still to be compared, rooted at `prefix`
type PendingPair = (Option<ObjectId>, Option<ObjectId>, RepoPath);

#[derive(Debug)]
pub struct TreeDiff<'r> {
    database: &'r Database,
    change_set: ChangeSet,
}

impl<'r> TreeDiff<'r> {
    pub fn new(database: &'r Database) -> Self {
        TreeDiff {
            database,
            change_set: ChangeSet::new(),
        }
    }

    pub fn into_changes(self) -> ChangeSet {
        self.change_set
    }

    /// Compare two trees (or commits, whose trees are used). `None` stands for
    /// the empty tree.
    pub fn compare_oids(
        &mut self,
        old: Option<&ObjectId>,
        new: Option<&ObjectId>,
        prefix: &RepoPath,
    ) -> anyhow::Result<()> {
        let mut pending: Vec<PendingPair> = vec![(old.cloned(), new.cloned(), prefix.clone())];

        while let Some((old, new, prefix)) = pending.pop() {
            if old == new {
                continue;
            }

            let old_tree = self.load_tree(old.as_ref())?;
            let new_tree = self.load_tree(new.as_ref())?;
            let names = old_tree
                .entries()
                .chain(new_tree.entries())
                .map(|(name, _)| name)
                .collect::<BTreeSet<_>>();

            for name in names {
                let old_entry = old_tree.get(name);
                let new_entry = new_tree.get(name);
                if old_entry == new_entry {
                    continue;
                }

                let path = prefix.join(name);
                let old_subtree = old_entry.filter(|e| e.is_tree()).map(|e| e.oid.clone());
                let new_subtree = new_entry.filter(|e| e.is_tree()).map(|e| e.oid.clone());
                if old_subtree.is_some() || new_subtree.is_some() {
                    pending.push((old_subtree, new_subtree, path.clone()));
                }

                let old_leaf = old_entry.filter(|e| !e.is_tree()).cloned();
                let new_leaf = new_entry.filter(|e| !e.is_tree()).cloned();
                if let Some(change) = EntryChange::between(old_leaf, new_leaf) {
                    self.change_set.insert(path, change);
                }
            }
        }

        Ok(())
    }

    fn load_tree(&self, oid: Option<&ObjectId>) -> anyhow::Result<Tree> {
        let Some(mut oid) = oid.cloned() else {
            return Ok(Tree::default());
        };

        loop {
            match self.database.parse_object(&oid)? {
                ObjectBox::Tree(tree) => return Ok(*tree),
                ObjectBox::Commit(commit) => oid = commit.tree_oid().clone(),
                other => anyhow::bail!("object {} is a {}, not a tree", oid, other.object_type()),
            }
        }
    }
}
