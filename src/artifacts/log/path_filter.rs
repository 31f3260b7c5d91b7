use crate::artifacts::churn::repo_path::SEPARATOR;
use std::collections::HashMap;

/// Restricts churn records to files equal to, or located under, a set of
/// repository-relative paths.
///
/// Matching is component-wise on raw bytes: `src` matches `src/main.rs` but
/// not `src-old/main.rs`.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    /// `None` accepts every path
    roots: Option<PathTrie>,
}

impl PathFilter {
    /// Filter accepting every path
    pub fn empty() -> Self {
        Self { roots: None }
    }

    /// Filter accepting the given paths and everything below them. Paths
    /// are read relative to `prefix`, the directory the command runs in
    /// (`""` at the top of the work tree).
    ///
    /// `.`, empty components and a trailing `/` are ignored, so `./src/`
    /// behaves like `src`; `..` steps out of the directory. A path that
    /// normalizes to the repository root accepts every file, and one that
    /// climbs above it is an error. No paths at all accepts every file.
    pub fn relative_to(prefix: &str, paths: &[impl AsRef<str>]) -> anyhow::Result<Self> {
        if paths.is_empty() {
            return Ok(Self::empty());
        }

        let mut roots = PathTrie::default();
        for path in paths {
            let path = path.as_ref();
            let parts = normalize(prefix, path)
                .ok_or_else(|| anyhow::anyhow!("'{path}' is outside repository"))?;
            roots.add(parts.into_iter());
        }

        Ok(Self { roots: Some(roots) })
    }

    pub fn matches_everything(&self) -> bool {
        self.roots.as_ref().is_none_or(|roots| roots.terminal)
    }

    pub fn matches(&self, path: impl AsRef<[u8]>) -> bool {
        match &self.roots {
            None => true,
            Some(roots) => roots.covers(path.as_ref().split(|byte| *byte == SEPARATOR)),
        }
    }
}

/// Components of `prefix/path` with `.` and `..` resolved; `None` when the
/// result would leave the repository
fn normalize<'a>(prefix: &'a str, path: &'a str) -> Option<Vec<&'a str>> {
    let mut parts = Vec::new();
    for part in prefix.split('/').chain(path.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            part => parts.push(part),
        }
    }

    Some(parts)
}

/// Path components of the selected roots, one node per component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PathTrie {
    /// A selected path ends at this node
    terminal: bool,
    below: HashMap<Vec<u8>, PathTrie>,
}

impl PathTrie {
    fn add<'a>(&mut self, parts: impl Iterator<Item = &'a str>) {
        let node = parts.fold(self, |node, part| {
            node.below.entry(part.as_bytes().to_vec()).or_default()
        });
        node.terminal = true;
    }

    /// Whether a selected path equals `parts` or is one of its ancestors
    fn covers<'a>(&self, parts: impl Iterator<Item = &'a [u8]>) -> bool {
        let mut node = self;
        for part in parts {
            if node.terminal {
                return true;
            }
            let Some(next) = node.below.get(part) else {
                return false;
            };
            node = next;
        }
        node.terminal
    }
}
