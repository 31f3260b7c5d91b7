//! Database entry types
//!
//! Types used when reading tree entries from the object database: a
//! reference to an object together with the mode recorded for it.

pub mod database_entry;
pub mod entry_mode;
