//! Object ids
//!
//! Every object in the repository, and every commit visited while counting
//! churn, is named by the lowercase hex form of its SHA-1. Loose objects are
//! stored under `objects/<2 hex chars>/<38 hex chars>`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use std::io;
use std::path::PathBuf;

/// Minimum length git accepts for an abbreviated object id
pub const MIN_PREFIX_LENGTH: usize = 4;

/// 40 lowercase hex characters; equality and hashing are by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Accepts a full-length hex id in either case
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        anyhow::ensure!(
            id.len() == OBJECT_ID_LENGTH,
            "object id '{id}' should be {OBJECT_ID_LENGTH} characters, not {}",
            id.len()
        );
        anyhow::ensure!(
            id.bytes().all(|b| b.is_ascii_hexdigit()),
            "object id '{id}' is not hexadecimal"
        );

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Decode the raw 20-byte form found in tree entries
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut raw)?;

        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect();
        Self::try_parse(hex40)
    }

    /// Location of the loose object, relative to the objects directory
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Seven-character abbreviation used in messages
    pub fn to_short_oid(&self) -> String {
        self.0[..7].to_string()
    }

    /// Whether `candidate` looks like an abbreviated object id
    pub fn is_prefix(candidate: &str) -> bool {
        (MIN_PREFIX_LENGTH..=OBJECT_ID_LENGTH).contains(&candidate.len())
            && candidate.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
