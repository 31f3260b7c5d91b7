//! Diff algorithms and tree comparison
//!
//! - `myers`: Myers' shortest edit computation, reduced to line counts
//! - `tree_diff`: Tree-level diffing for detecting file changes
//!
//! A commit's churn is the tree diff against its first parent, with each
//! changed blob pair measured line by line.

pub mod myers;
pub mod tree_diff;
