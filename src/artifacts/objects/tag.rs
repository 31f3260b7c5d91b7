//! Annotated tag object
//!
//! Revisions naming an annotated tag are peeled through `object` until a
//! commit is reached.
//!
//! ## Format
//!
//! ```text
//! object <sha>
//! type <object-type>
//! tag <name>
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Tag {
    target: ObjectId,
    target_type: ObjectType,
}

impl Tag {
    pub fn target(&self) -> &ObjectId {
        &self.target
    }

    pub fn target_type(&self) -> ObjectType {
        self.target_type
    }
}

impl Unpackable for Tag {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut target = None;
        let mut target_type = None;
        let mut line = String::new();

        while reader.read_line(&mut line)? > 0 {
            let header = line.trim_end_matches('\n');
            if header.is_empty() {
                break;
            }

            if let Some(oid) = header.strip_prefix("object ") {
                target = Some(ObjectId::try_parse(oid.to_string())?);
            } else if let Some(kind) = header.strip_prefix("type ") {
                target_type = Some(ObjectType::try_from(kind)?);
            }
            line.clear();
        }

        Ok(Tag::new(
            target.context("Invalid tag object: missing object line")?,
            target_type.context("Invalid tag object: missing type line")?,
        ))
    }
}
