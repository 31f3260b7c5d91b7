//! Git commit object
//!
//! Only the header is decoded: the snapshot tree and the ordered parent list
//! are all the churn traversal needs from a commit.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>        (zero or more)
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs (empty for a root commit, several for a merge)
    parents: Vec<ObjectId>,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn into_parents(self) -> Vec<ObjectId> {
        self.parents
    }

    /// First parent, the side a commit's own diff is computed against
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut line = Vec::new();

        // headers end at the first empty line; the message may not be UTF-8
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.is_empty() {
                break;
            }

            if let Some(oid) = line.strip_prefix(b"tree ") {
                let oid = std::str::from_utf8(oid).context("Invalid commit object: tree line")?;
                tree_oid = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(oid) = line.strip_prefix(b"parent ") {
                let oid =
                    std::str::from_utf8(oid).context("Invalid commit object: parent line")?;
                parents.push(ObjectId::try_parse(oid.to_string())?);
            }
        }

        let tree_oid = tree_oid.context("Invalid commit object: missing tree line")?;
        Ok(Commit::new(tree_oid, parents))
    }
}
