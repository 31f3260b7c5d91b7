//! Line churn over commit ancestry
//!
//! Providers describe a commit graph through [`history::HistoryGraph`]; a
//! [`traversal::Traversal`] walks that graph once per invocation and folds
//! every ancestor's own diff together with the [`merge::merge`] engine.

pub mod commit_diff;
pub mod error;
pub mod history;
pub mod merge;
pub mod repo_path;
pub mod summary;
pub mod traversal;
