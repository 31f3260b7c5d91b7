//! Git data structures and algorithms
//!
//! - `branch`: Ref names and revision parsing
//! - `churn`: Churn records, the k-way merge and the ancestry traversal
//! - `core`: Shared utilities (pager wrapper, etc.)
//! - `database`: Database entry types
//! - `diff`: Tree diffing and Myers line statistics
//! - `log`: Revision ranges and path filtering
//! - `objects`: Git object types (blob, tree, commit, tag)

pub mod branch;
pub mod churn;
pub mod core;
pub mod database;
pub mod diff;
pub mod log;
pub mod objects;
