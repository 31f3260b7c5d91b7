//! Git object types, read side
//!
//! Git stores all content as objects identified by SHA-1 hashes:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (tree and parent commits)
//! - **Tag**: Annotated reference to another object
//!
//! Every object is stored as `<type> <size>\0<content>`. Only the parts the
//! churn computation needs are decoded; authorship, dates and messages are
//! skipped.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
