use crate::artifacts::log::{DEFAULT_REVISION, EXCLUDED_REGEX, RANGE_REGEX, SYMMETRIC_RANGE_REGEX};
use anyhow::Context;

/// Revisions selected on the command line
///
/// The churn traversal starts from exactly one commit. Every commit
/// reachable from an excluded revision is treated as already visited and so
/// contributes nothing.
///
/// | argument | start | excluded |
/// |----------|-------|----------|
/// | (none)   | HEAD  |          |
/// | `B`      | B     |          |
/// | `^A`     | HEAD  | A        |
/// | `A..B`   | B     | A        |
/// | `A..`    | HEAD  | A        |
/// | `..B`    | B     | HEAD     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub start: String,
    pub excluded: Vec<String>,
}

impl RevisionRange {
    pub fn try_parse(arguments: &[String]) -> anyhow::Result<Self> {
        let symmetric = regex::Regex::new(SYMMETRIC_RANGE_REGEX)
            .with_context(|| format!("invalid symmetric range regex: {SYMMETRIC_RANGE_REGEX}"))?;
        let range = regex::Regex::new(RANGE_REGEX)
            .with_context(|| format!("invalid range regex: {RANGE_REGEX}"))?;
        let excluded_re = regex::Regex::new(EXCLUDED_REGEX)
            .with_context(|| format!("invalid excluded regex: {EXCLUDED_REGEX}"))?;

        let mut included = Vec::new();
        let mut excluded = Vec::new();

        for argument in arguments {
            if symmetric.is_match(argument) {
                anyhow::bail!(
                    "symmetric difference '{}' is not supported: churn starts from a single commit",
                    argument
                );
            } else if let Some(caps) = range.captures(argument) {
                excluded.push(Self::or_default(&caps[1]));
                included.push(Self::or_default(&caps[2]));
            } else if let Some(caps) = excluded_re.captures(argument) {
                excluded.push(caps[1].to_string());
            } else {
                included.push(argument.clone());
            }
        }

        let start = match included.as_slice() {
            [] => DEFAULT_REVISION.to_string(),
            [start] => start.clone(),
            [_, ..] => anyhow::bail!(
                "only one starting revision is supported, got: {}",
                included.join(", ")
            ),
        };

        Ok(RevisionRange { start, excluded })
    }

    fn or_default(side: &str) -> String {
        if side.is_empty() {
            DEFAULT_REVISION.to_string()
        } else {
            side.to_string()
        }
    }
}
