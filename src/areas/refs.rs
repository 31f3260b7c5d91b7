//! Git references (branches, HEAD, tags)
//!
//! References are human-readable names pointing to objects. They can be:
//! - Direct: containing an object SHA-1
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## Storage
//!
//! - Loose refs are files under the git directory holding either a
//!   40-character SHA-1 or `ref: <path>`
//! - `packed-refs` holds `<sha> <refname>` lines; a loose ref with the same
//!   name takes precedence

use crate::artifacts::branch::ref_name::{RefName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::HashMap;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Name of the packed refs file inside the git directory
const PACKED_REFS_FILE: &str = "packed-refs";

/// How many symbolic references are followed before giving up
const MAX_SYMREF_DEPTH: usize = 5;

/// Read-only view of a repository's references
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

/// Internal representation of a reference value
#[derive(Debug, Clone)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef { sym_ref_name: SymRefName },
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            let oid = ObjectId::try_parse(content.to_string())
                .with_context(|| format!("invalid ref file at {:?}", path))?;
            Ok(Some(SymRefOrOid::Oid(oid)))
        }
    }
}

impl Refs {
    /// The commit HEAD points to, or `None` on an unborn branch
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let packed = self.packed_refs()?;
        self.read_ref_path(HEAD_REF_NAME, &packed, 0)
    }

    /// Look a short or full ref name up the way git does: the git directory
    /// itself, then `refs/`, `refs/tags/`, `refs/heads/`, `refs/remotes/`.
    ///
    /// Returns `None` when no such ref exists.
    pub fn read_ref(&self, ref_name: &RefName) -> anyhow::Result<Option<ObjectId>> {
        let packed = self.packed_refs()?;

        for candidate in ref_name.candidate_paths() {
            if let Some(oid) = self.read_ref_path(&candidate, &packed, 0)? {
                return Ok(Some(oid));
            }
        }

        Ok(None)
    }

    fn read_ref_path(
        &self,
        ref_path: &str,
        packed: &HashMap<String, ObjectId>,
        depth: usize,
    ) -> anyhow::Result<Option<ObjectId>> {
        if depth > MAX_SYMREF_DEPTH {
            anyhow::bail!("symbolic ref {} is nested too deeply", ref_path);
        }

        match SymRefOrOid::read_symref_or_oid(&self.path.join(ref_path))? {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                self.read_ref_path(sym_ref_name.as_ref_path(), packed, depth + 1)
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(packed.get(ref_path).cloned()),
        }
    }

    /// Parse `packed-refs`, skipping comments and peeled (`^`) lines
    pub fn packed_refs(&self) -> anyhow::Result<HashMap<String, ObjectId>> {
        let path = self.path.join(PACKED_REFS_FILE);
        if !path.is_file() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read packed refs at {:?}", path))?;

        content
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('^'))
            .map(|line| {
                let (oid, name) = line
                    .split_once(' ')
                    .with_context(|| format!("malformed packed ref line: {line}"))?;
                Ok((name.to_string(), ObjectId::try_parse(oid.to_string())?))
            })
            .collect()
    }
}
