//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `churn`: per-file line churn over a commit's ancestry

pub mod churn;
