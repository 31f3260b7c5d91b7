//! Git blob object
//!
//! Blobs store raw file content. Content is kept as bytes: churn is counted
//! on lines of arbitrary encodings and binary files must be recognised rather
//! than rejected.

use crate::artifacts::objects::object::Unpackable;
use bytes::Bytes;
use std::io::BufRead;

/// How many leading bytes are inspected for a NUL when classifying content
pub const BINARY_SNIFF_LENGTH: usize = 8000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Blob {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Git's heuristic: content with a NUL byte near the start is binary
    pub fn is_binary(&self) -> bool {
        self.content
            .iter()
            .take(BINARY_SNIFF_LENGTH)
            .any(|byte| *byte == 0)
    }

    /// Lines including their terminator; a missing final newline still
    /// yields a (distinct) last line
    pub fn lines(&self) -> Vec<&[u8]> {
        self.content.split_inclusive(|byte| *byte == b'\n').collect()
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Blob::new(content))
    }
}
