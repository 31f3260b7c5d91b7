//! History providers
//!
//! Two interchangeable implementations of the history graph:
//!
//! - `repository`: reads the loose object store directly (`database`, `refs`)
//! - `git_cli`: shells out to git plumbing commands

pub(crate) mod database;
pub mod git_cli;
pub(crate) mod refs;
pub mod repository;
