//! History provider backed by the `git` executable
//!
//! Every query is answered by a plumbing command:
//!
//! - `git rev-parse --verify` turns a revision into a commit id
//! - `git rev-parse --show-prefix` locates the directory we run in
//! - `git rev-list --parents -n 1` lists a commit's parents
//! - `git diff-tree -r --numstat --no-renames -z` produces the per-file line
//!   counts of a commit against its first parent
//!
//! `-z` output is NUL-delimited, so paths are taken verbatim, as raw bytes,
//! without git's C-style quoting.

use crate::artifacts::churn::commit_diff::{CommitDiff, FileChurn};
use crate::artifacts::churn::error::{ChurnError, ChurnResult};
use crate::artifacts::churn::history::{HistoryGraph, RevisionResolver};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Output};

/// Marker git prints instead of line counts for binary files
const BINARY_COUNT: &[u8] = b"-";

#[derive(Debug)]
pub struct GitCli {
    dir: Box<Path>,
    parents: RefCell<HashMap<ObjectId, Vec<ObjectId>>>,
}

impl GitCli {
    pub fn new(dir: Box<Path>) -> Self {
        GitCli {
            dir,
            parents: RefCell::new(HashMap::new()),
        }
    }

    /// Provider for the repository containing `dir`; fails when git does not
    /// recognise one there
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        let cli = GitCli::new(dir.to_path_buf().into_boxed_path());
        let output = cli.git(&["rev-parse", "--git-dir"])?;

        if !output.status.success() {
            anyhow::bail!(
                "not a git repository (or any of the parent directories): {}",
                dir.display()
            );
        }

        Ok(cli)
    }

    /// Directory the provider runs in, relative to the top of the work tree
    /// and ending in `/`; empty at the top or in a bare repository
    pub fn worktree_prefix(&self) -> anyhow::Result<String> {
        let output = self.git(&["rev-parse", "--show-prefix"])?;
        if !output.status.success() {
            anyhow::bail!(
                "git rev-parse --show-prefix failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let prefix = String::from_utf8(output.stdout).context("work tree prefix is not UTF-8")?;
        Ok(prefix.trim_end_matches('\n').to_string())
    }

    fn git(&self, args: &[&str]) -> anyhow::Result<Output> {
        tracing::trace!(?args, dir = %self.dir.display(), "running git");

        Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .with_context(|| format!("failed to run git {}", args.join(" ")))
    }

    fn lookup_parents(&self, commit: &ObjectId) -> ChurnResult<Vec<ObjectId>> {
        let commit_id: &str = commit.as_ref();
        let output = self.git(&["rev-list", "--parents", "-n", "1", commit_id, "--"])?;
        if !output.status.success() {
            tracing::debug!(
                %commit,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "rev-list failed"
            );
            return Err(ChurnError::unknown_commit(commit));
        }

        parse_parent_line(commit, &output.stdout)
    }
}

impl HistoryGraph for GitCli {
    fn parents(&self, commit: &ObjectId) -> ChurnResult<Vec<ObjectId>> {
        if let Some(parents) = self.parents.borrow().get(commit) {
            return Ok(parents.clone());
        }

        let parents = self.lookup_parents(commit)?;
        self.parents
            .borrow_mut()
            .insert(commit.clone(), parents.clone());

        Ok(parents)
    }

    fn diff(&self, commit: &ObjectId) -> ChurnResult<CommitDiff> {
        let parents = self.parents(commit)?;
        let commit_id: &str = commit.as_ref();

        let mut args = vec!["diff-tree", "-r", "--numstat", "--no-renames", "-z"];
        match parents.first() {
            Some(first_parent) => args.extend([first_parent.as_ref(), commit_id]),
            None => args.extend(["--root", "--no-commit-id", commit_id]),
        }

        let output = self.git(&args)?;
        if !output.status.success() {
            return Err(ChurnError::Provider(anyhow::anyhow!(
                "git diff-tree failed for {}: {}",
                commit,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let diff = parse_numstat(commit, &output.stdout)?;
        tracing::debug!(%commit, files = diff.len(), "parsed numstat");

        Ok(diff)
    }
}

impl RevisionResolver for GitCli {
    fn resolve(&self, revision: &str) -> anyhow::Result<ObjectId> {
        let peeled = format!("{revision}^{{commit}}");
        let output = self.git(&["rev-parse", "--verify", "--quiet", "--end-of-options", &peeled])?;

        if !output.status.success() {
            anyhow::bail!(
                "ambiguous argument '{}': unknown revision or path not in the working tree",
                revision
            );
        }

        let stdout = String::from_utf8(output.stdout)
            .with_context(|| format!("git rev-parse printed a non UTF-8 id for {revision}"))?;
        ObjectId::try_parse(stdout.trim().to_string())
    }
}

/// Parse `<commit> <parent>...` as printed by `rev-list --parents`
fn parse_parent_line(commit: &ObjectId, stdout: &[u8]) -> ChurnResult<Vec<ObjectId>> {
    let line = String::from_utf8_lossy(stdout);
    let mut ids = line.split_whitespace();

    match ids.next() {
        Some(first) if first == commit.to_string() => {}
        _ => return Err(ChurnError::unknown_commit(commit)),
    }

    ids.map(|id| {
        ObjectId::try_parse(id.to_string())
            .map_err(|_| ChurnError::malformed_diff(commit, format!("invalid parent id '{id}'")))
    })
    .collect()
}

/// Parse `git diff-tree --numstat -z` output.
///
/// Each record is `<insertions>\t<deletions>\t<path>\0`. Binary files report
/// `-` for both counts and are left out. A leading commit id line (printed
/// when `--no-commit-id` is absent) is skipped.
pub fn parse_numstat(commit: &ObjectId, stdout: &[u8]) -> ChurnResult<CommitDiff> {
    let mut records = Vec::new();

    for record in stdout.split(|byte| *byte == 0) {
        let record = record.strip_prefix(b"\n").unwrap_or(record);
        if record.is_empty() || is_commit_header(record) {
            continue;
        }

        let mut fields = record.splitn(3, |byte| *byte == b'\t');
        let (Some(insertions), Some(deletions), Some(path)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(ChurnError::malformed_diff(
                commit,
                format!("expected three fields in '{}'", String::from_utf8_lossy(record)),
            ));
        };

        if path.is_empty() {
            return Err(ChurnError::malformed_diff(commit, "empty path in numstat record"));
        }

        if insertions == BINARY_COUNT && deletions == BINARY_COUNT {
            tracing::trace!(%commit, path = %String::from_utf8_lossy(path), "skipping binary file");
            continue;
        }

        records.push(FileChurn::new(
            path.to_vec(),
            parse_count(commit, insertions)?,
            parse_count(commit, deletions)?,
        ));
    }

    CommitDiff::try_from_records(records)
}

fn is_commit_header(record: &[u8]) -> bool {
    record.len() == 40 && record.iter().all(u8::is_ascii_hexdigit)
}

fn parse_count(commit: &ObjectId, field: &[u8]) -> ChurnResult<u64> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| {
            ChurnError::malformed_diff(
                commit,
                format!("invalid line count '{}'", String::from_utf8_lossy(field)),
            )
        })
}
