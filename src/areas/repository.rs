//! Native history provider
//!
//! Answers parent and diff queries straight from a repository's loose object
//! store, without spawning git.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::churn::commit_diff::{CommitDiff, FileChurn};
use crate::artifacts::churn::error::{ChurnError, ChurnResult};
use crate::artifacts::churn::history::{HistoryGraph, RevisionResolver};
use crate::artifacts::churn::repo_path::RepoPath;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::database::entry_mode::EntryMode;
use crate::artifacts::diff::myers::{LineStats, MyersDiff};
use crate::artifacts::diff::tree_diff::EntryChange;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::path::{Path, PathBuf};

const GIT_DIR_NAME: &str = ".git";
const GITDIR_PREFIX: &str = "gitdir:";

#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    git_dir: Box<Path>,
    /// Canonical directory the repository was opened from
    start: Box<Path>,
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open the repository containing `path`, walking up until a `.git`
    /// directory (or `.git` file pointing elsewhere) is found. A bare
    /// repository is accepted when `path` itself is one.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("cannot access {}", path.display()))?;

        let (work_dir, git_dir) = Self::discover(&path).with_context(|| {
            format!(
                "not a git repository (or any of the parent directories): {}",
                path.display()
            )
        })?;
        tracing::debug!(git_dir = %git_dir.display(), "opened repository");

        let database = Database::new(git_dir.join("objects").into_boxed_path());
        let refs = Refs::new(git_dir.clone().into_boxed_path());

        Ok(Repository {
            path: work_dir.into_boxed_path(),
            git_dir: git_dir.into_boxed_path(),
            start: path.into_boxed_path(),
            database,
            refs,
        })
    }

    fn discover(start: &Path) -> Option<(PathBuf, PathBuf)> {
        if Self::is_git_dir(start) {
            return Some((start.to_path_buf(), start.to_path_buf()));
        }

        for dir in start.ancestors() {
            let candidate = dir.join(GIT_DIR_NAME);
            if candidate.is_dir() && Self::is_git_dir(&candidate) {
                return Some((dir.to_path_buf(), candidate));
            }
            if candidate.is_file()
                && let Some(linked) = Self::read_gitdir_file(&candidate)
            {
                return Some((dir.to_path_buf(), linked));
            }
        }

        None
    }

    fn is_git_dir(path: &Path) -> bool {
        path.join("objects").is_dir() && path.join("HEAD").is_file()
    }

    /// `.git` files (worktrees, submodules) hold `gitdir: <path>`
    fn read_gitdir_file(path: &Path) -> Option<PathBuf> {
        let content = std::fs::read_to_string(path).ok()?;
        let target = content.trim().strip_prefix(GITDIR_PREFIX)?.trim();
        let target = match path.parent() {
            Some(parent) => parent.join(target),
            None => PathBuf::from(target),
        };

        Self::is_git_dir(&target).then_some(target)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Directory the repository was opened from, relative to the top of the
    /// work tree and ending in `/`. Empty at the top, in a bare repository
    /// and inside the git directory.
    pub fn worktree_prefix(&self) -> anyhow::Result<String> {
        if self.path() == self.git_dir() || self.start.starts_with(&self.git_dir) {
            return Ok(String::new());
        }
        let Ok(relative) = self.start.strip_prefix(self.path()) else {
            return Ok(String::new());
        };

        let mut prefix = String::new();
        for component in relative.components() {
            let name = component.as_os_str().to_str().with_context(|| {
                format!("directory name is not UTF-8: {}", relative.display())
            })?;
            prefix.push_str(name);
            prefix.push('/');
        }

        Ok(prefix)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Load a commit; anything that is missing or not a commit is unknown
    pub fn commit(&self, oid: &ObjectId) -> ChurnResult<Commit> {
        if !self.database.contains(oid) {
            return Err(ChurnError::unknown_commit(oid));
        }

        self.database
            .parse_object_as_commit(oid)?
            .ok_or_else(|| ChurnError::unknown_commit(oid))
    }

    fn file_churn(
        &self,
        commit: &ObjectId,
        path: RepoPath,
        change: &EntryChange,
    ) -> ChurnResult<Option<FileChurn>> {
        let old = self.entry_content(commit, &path, change.old_entry())?;
        let new = self.entry_content(commit, &path, change.new_entry())?;

        if old.is_binary() || new.is_binary() {
            tracing::trace!(%commit, path = %path, "skipping binary file");
            return Ok(None);
        }

        let (old_lines, new_lines) = (old.lines(), new.lines());
        let LineStats {
            insertions,
            deletions,
        } = MyersDiff::new(&old_lines, &new_lines).line_stats();

        Ok(Some(FileChurn::new(path, insertions, deletions)))
    }

    fn entry_content(
        &self,
        commit: &ObjectId,
        path: &RepoPath,
        entry: Option<&DatabaseEntry>,
    ) -> ChurnResult<Blob> {
        let Some(entry) = entry else {
            return Ok(Blob::default());
        };

        if entry.mode == EntryMode::Gitlink {
            // git renders a submodule as a single line naming its commit
            return Ok(Blob::new(format!("Subproject commit {}\n", entry.oid)));
        }

        self.database
            .parse_object_as_blob(&entry.oid)
            .with_context(|| format!("failed to read blob {} for {}", entry.oid, path))?
            .ok_or_else(|| {
                ChurnError::malformed_diff(commit, format!("{} is not a blob ({})", entry.oid, path))
            })
    }
}

impl HistoryGraph for Repository {
    fn parents(&self, commit: &ObjectId) -> ChurnResult<Vec<ObjectId>> {
        Ok(self.commit(commit)?.into_parents())
    }

    fn diff(&self, commit: &ObjectId) -> ChurnResult<CommitDiff> {
        let loaded = self.commit(commit)?;
        let base = loaded.parent().map(|parent| self.commit(parent)).transpose()?;

        let changes = self
            .database
            .tree_diff(
                base.as_ref().map(Commit::tree_oid),
                Some(loaded.tree_oid()),
            )
            .with_context(|| format!("failed to diff trees of commit {commit}"))?;
        tracing::debug!(%commit, changed = changes.len(), "computed tree diff");

        let mut records = Vec::with_capacity(changes.len());
        for (path, change) in &changes {
            if let Some(record) = self.file_churn(commit, path.clone(), change)? {
                records.push(record);
            }
        }

        CommitDiff::try_from_records(records)
    }
}

impl RevisionResolver for Repository {
    fn resolve(&self, revision: &str) -> anyhow::Result<ObjectId> {
        Revision::try_parse(revision)?.resolve(self)
    }
}
