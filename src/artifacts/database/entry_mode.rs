/// Permission bits of a regular file
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// Mode of a tree entry
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum EntryMode {
    File(FileMode),
    Symlink,
    /// Submodule commit
    Gitlink,
    #[default]
    Directory,
}

const TYPE_MASK: u32 = 0o170000;
const TYPE_FILE: u32 = 0o100000;
const TYPE_SYMLINK: u32 = 0o120000;
const TYPE_GITLINK: u32 = 0o160000;
const TYPE_DIRECTORY: u32 = 0o040000;

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Gitlink => "160000",
            EntryMode::Directory => "40000",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, EntryMode::File(_) | EntryMode::Symlink)
    }

    /// Parse the octal mode of a tree entry.
    ///
    /// Old repositories may record group-writable files (`100664`); like git,
    /// only the object type and the executable bit are kept.
    pub fn from_octal_str(mode: &str) -> anyhow::Result<Self> {
        let bits = u32::from_str_radix(mode, 8)
            .map_err(|_| anyhow::anyhow!("Invalid entry mode: {mode}"))?;

        match bits & TYPE_MASK {
            TYPE_FILE if bits & 0o111 != 0 => Ok(EntryMode::File(FileMode::Executable)),
            TYPE_FILE => Ok(EntryMode::File(FileMode::Regular)),
            TYPE_SYMLINK => Ok(EntryMode::Symlink),
            TYPE_GITLINK => Ok(EntryMode::Gitlink),
            TYPE_DIRECTORY => Ok(EntryMode::Directory),
            _ => Err(anyhow::anyhow!("Invalid entry mode: {mode}")),
        }
    }
}
