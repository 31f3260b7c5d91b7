use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RefName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, PEEL_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

/// Represents a revision specification that identifies a single commit.
///
/// Supports multiple formats:
/// - Ref names: `main`, `feature/new-feature`, `v1.0`, `HEAD`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full or abbreviated OIDs (4-40 hexadecimal characters), tried when no
///   ref with that name exists
/// - Parent notation: `<revision>^` or `<revision>^<n>` for the n-th parent
/// - Ancestor notation: `<revision>~<n>` (first-parent walk)
/// - Peeling: `<revision>^{commit}` and `<revision>^{}`
///
/// # Parsing Strategy
///
/// OID-like strings (e.g., "abc123") are initially parsed as `Ref` variants. During resolution,
/// if no ref with that name exists and the string looks like an OID, the resolver will
/// attempt to resolve it as an object ID. This matches Git's behavior of preferring refs
/// over OIDs when there's ambiguity.
///
/// # Examples
///
/// ```ignore
/// let rev = Revision::try_parse("main~3")?;
/// let oid = rev.resolve(&repository)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A reference, or potentially an OID (resolved during resolution phase)
    Ref(RefName),
    /// The n-th parent of a revision (`HEAD^`, `HEAD^2`); `^0` is the commit itself
    Parent(Box<Revision>, usize),
    /// The n-th first-parent ancestor of a revision (e.g., `HEAD~3`)
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let peel = regex::Regex::new(PEEL_REGEX)
            .with_context(|| format!("invalid peel regex: {PEEL_REGEX}"))?;
        let parent = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = peel.captures(revision) {
            // every revision resolves to a commit already
            Self::try_parse(&caps[1])
        } else if let Some(caps) = parent.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;
            let nth = Self::parse_count(&caps[2], revision)?;

            Ok(Revision::Parent(Box::new(base_revision), nth))
        } else if let Some(caps) = ancestor.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;
            let generations = Self::parse_count(&caps[2], revision)?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let ref_name = RefName::try_parse(resolved_name.to_string())?;
            Ok(Revision::Ref(ref_name))
        }
    }

    fn parse_count(digits: &str, revision: &str) -> anyhow::Result<usize> {
        if digits.is_empty() {
            return Ok(1);
        }

        digits
            .parse()
            .with_context(|| format!("failed to parse count in revision: {revision}"))
    }

    /// Resolve to the id of a commit, peeling annotated tags on the way.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Ref(ref_name) => {
                if let Some(oid) = repository.refs().read_ref(ref_name)? {
                    return Self::peel_to_commit(oid, repository);
                }

                if ObjectId::is_prefix(ref_name.as_ref()) {
                    let oid = Self::resolve_oid(ref_name.as_ref(), repository)?;
                    return Self::peel_to_commit(oid, repository);
                }

                anyhow::bail!(
                    "ambiguous argument '{}': unknown revision or path not in the working tree",
                    ref_name
                )
            }
            Revision::Parent(base_revision, nth) => {
                let oid = base_revision.resolve(repository)?;
                if *nth == 0 {
                    return Ok(oid);
                }

                Self::read_parents(&oid, repository)?
                    .into_iter()
                    .nth(nth - 1)
                    .with_context(|| format!("commit {} has no parent {}", oid.to_short_oid(), nth))
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::read_parents(&oid, repository)?
                        .into_iter()
                        .next()
                        .with_context(|| format!("commit {} has no parent", oid.to_short_oid()))?;
                }

                Ok(oid)
            }
        }
    }

    fn read_parents(oid: &ObjectId, repository: &Repository) -> anyhow::Result<Vec<ObjectId>> {
        let commit = repository
            .database()
            .parse_object_as_commit(oid)?
            .with_context(|| format!("object {} not found", oid))?;

        Ok(commit.into_parents())
    }

    fn peel_to_commit(oid: ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        let mut oid = oid;

        loop {
            let obj_type = repository
                .database()
                .get_object_type(&oid)
                .with_context(|| format!("object {} not found", oid))?;

            match obj_type {
                ObjectType::Commit => return Ok(oid),
                ObjectType::Tag => {
                    let tag = repository
                        .database()
                        .parse_object_as_tag(&oid)?
                        .with_context(|| format!("object {} not found", oid))?;
                    oid = tag.target().clone();
                }
                other => anyhow::bail!(
                    "object {} is a {}, not a commit",
                    oid.to_short_oid(),
                    other
                ),
            }
        }
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        let matches = repository.database().find_objects_by_prefix(oid_str)?;

        match matches.len() {
            0 => anyhow::bail!(
                "ambiguous argument '{}': unknown revision or path not in the working tree",
                oid_str
            ),
            1 => Ok(matches[0].clone()),
            _ => {
                // only commits (or tags) are valid candidates for a revision
                let commit_matches: Vec<_> = matches
                    .iter()
                    .filter(|oid| {
                        repository
                            .database()
                            .get_object_type(oid)
                            .map(|t| t == ObjectType::Commit || t == ObjectType::Tag)
                            .unwrap_or(false)
                    })
                    .collect();

                match commit_matches.as_slice() {
                    [] => anyhow::bail!(
                        "ambiguous argument '{}': unknown revision or path not in the working tree",
                        oid_str
                    ),
                    [single] => Ok((*single).clone()),
                    candidates => {
                        let mut error_msg = format!(
                            "short SHA1 {} is ambiguous\nhint: The candidates are:",
                            oid_str
                        );
                        for oid in candidates {
                            error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                        }
                        anyhow::bail!(error_msg)
                    }
                }
            }
        }
    }
}
