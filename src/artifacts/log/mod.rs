//! Revision selection for a churn report
//!
//! - `rev_range`: turns command line revision arguments into one starting
//!   revision plus the revisions whose ancestry is excluded
//! - `path_filter`: component-wise path matching using a trie

pub mod path_filter;
pub mod rev_range;

pub const SYMMETRIC_RANGE_REGEX: &str = r"^(.*)\.\.\.(.*)$";
pub const RANGE_REGEX: &str = r"^(.*)\.\.(.*)$";
pub const EXCLUDED_REGEX: &str = r"^\^(.+)$";

/// Revision used when a range side or the whole selection is left out
pub const DEFAULT_REVISION: &str = "HEAD";
