use crate::artifacts::branch::INVALID_REF_NAME_REGEX;
use anyhow::Context;
use derive_new::new;

/// Full path of a reference relative to the git directory, as found on the
/// right-hand side of `ref: ...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

/// A user supplied reference name: `HEAD`, `main`, `v1.0`, `tags/v1.0`,
/// `refs/heads/main`, or a hexadecimal string that may turn out to be an
/// abbreviated object id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("ref name cannot be empty");
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .with_context(|| format!("invalid ref name regex: {INVALID_REF_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid ref name: {}", name);
        } else {
            Ok(Self(name))
        }
    }

    /// Pseudo refs such as `HEAD` or `ORIG_HEAD` live directly in the git
    /// directory next to files like `config`, so only upper-case names
    /// are looked up there
    pub fn is_pseudo_ref(&self) -> bool {
        self.0.chars().all(|c| c.is_ascii_uppercase() || c == '_')
    }

    /// Paths, relative to the git directory, tried in order when looking the
    /// name up (the same precedence git uses)
    pub fn candidate_paths(&self) -> Vec<String> {
        let bare = if self.is_pseudo_ref() || self.0.starts_with("refs/") {
            Some(self.0.clone())
        } else {
            None
        };

        bare.into_iter()
            .chain(
                ["refs/", "refs/tags/", "refs/heads/", "refs/remotes/"]
                    .iter()
                    .map(|prefix| format!("{prefix}{}", self.0)),
            )
            .chain(std::iter::once(format!("refs/remotes/{}/HEAD", self.0)))
            .collect()
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
