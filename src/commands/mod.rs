//! Command implementations
//!
//! - `porcelain`: user-facing commands (`churn`)

pub mod porcelain;
