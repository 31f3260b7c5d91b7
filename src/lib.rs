//! Per-file line churn across the ancestry of a commit.
//!
//! The core lives in [`artifacts::churn`]: a memoized traversal that visits
//! every ancestor once and folds each commit's own diff into a path-sorted
//! total with a k-way merge. Merge commits contribute only what their parents
//! carry. History comes from a provider in [`areas`], either the `git`
//! executable or the repository's loose object store.

pub mod areas;
pub mod artifacts;
pub mod commands;

use clap::ValueEnum;

/// Where commit parents and diffs are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// Run git plumbing commands
    #[default]
    Git,
    /// Read loose objects and refs directly
    Objects,
}

/// How the aggregated churn is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Tab separated lines followed by a summary
    #[default]
    Text,
    /// A single JSON document
    Json,
}
