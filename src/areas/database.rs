//! Loose object store
//!
//! Reads zlib-compressed objects from `.git/objects/xx/yyyy...`. Packfiles
//! are not read: an object that only lives in a pack is reported as missing.

use crate::artifacts::churn::repo_path::RepoPath;
use crate::artifacts::diff::tree_diff::{ChangeSet, TreeDiff};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, Cursor, Read};
use std::path::{Path, PathBuf};

/// Id of the tree with no entries
pub const EMPTY_TREE_OID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
const EMPTY_TREE_OBJECT: &[u8] = b"tree 0\0";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    commits: RefCell<HashMap<ObjectId, Commit>>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            commits: RefCell::new(HashMap::new()),
        }
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Changed blobs between two trees or commits; `None` is the empty tree
    pub fn tree_diff(
        &self,
        old_oid: Option<&ObjectId>,
        new_oid: Option<&ObjectId>,
    ) -> anyhow::Result<ChangeSet> {
        let mut tree_diff = TreeDiff::new(self);
        tree_diff.compare_oids(old_oid, new_oid, &RepoPath::default())?;
        Ok(tree_diff.into_changes())
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        // git treats the empty tree as always present and may never write it
        if AsRef::<str>::as_ref(object_id) == EMPTY_TREE_OID && !object_path.is_file() {
            return Ok(Bytes::from_static(EMPTY_TREE_OBJECT));
        }

        self.read_object(object_path)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        let object = match object_type {
            ObjectType::Blob => ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?)),
            ObjectType::Tree => ObjectBox::Tree(Box::new(Tree::deserialize(object_reader)?)),
            ObjectType::Commit => {
                ObjectBox::Commit(Box::new(Commit::deserialize(object_reader)?))
            }
            ObjectType::Tag => ObjectBox::Tag(Box::new(Tag::deserialize(object_reader)?)),
        };

        Ok(object)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_tag(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tag>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tag => Ok(Some(Tag::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Parse a commit, memoizing the result for the lifetime of the database
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        if let Some(commit) = self.commits.borrow().get(object_id) {
            return Ok(Some(commit.clone()));
        }

        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => {
                let commit = Commit::deserialize(object_reader)
                    .with_context(|| format!("Unable to parse commit {object_id}"))?;
                self.commits
                    .borrow_mut()
                    .insert(object_id.clone(), commit.clone());
                Ok(Some(commit))
            }
            _ => Ok(None),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)
            .with_context(|| format!("Invalid object header for {object_id}"))?;

        let remaining = object_reader.get_ref().len() - object_reader.position() as usize;
        if remaining != size {
            anyhow::bail!(
                "Object {} declares {} bytes but holds {}",
                object_id,
                size,
                remaining
            );
        }

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    /// Find all loose objects whose OID starts with the given prefix.
    ///
    /// Prefixes are at least [`MIN_PREFIX_LENGTH`] characters long, so only
    /// the fan-out directory named by the first two characters is searched.
    ///
    /// [`MIN_PREFIX_LENGTH`]: crate::artifacts::objects::object_id::MIN_PREFIX_LENGTH
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if !ObjectId::is_prefix(prefix) {
            anyhow::bail!("invalid object id prefix: {prefix}");
        }

        let prefix = prefix.to_ascii_lowercase();
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);
        let mut matches = Vec::new();

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)
                .with_context(|| format!("Unable to list {}", dir_path.display()))?
            {
                let file_name = entry?.file_name();
                let file_name_str = file_name.to_string_lossy();

                if file_name_str.starts_with(file_prefix) {
                    let full_oid = format!("{}{}", dir_name, file_name_str);
                    if let Ok(oid) = ObjectId::try_parse(full_oid) {
                        matches.push(oid);
                    }
                }
            }
        }

        matches.sort();
        Ok(matches)
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }
}
