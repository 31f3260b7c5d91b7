use thiserror::Error;

/// Failures surfaced by a churn traversal.
///
/// Provider failures are never retried or masked by the traversal; they abort
/// the walk and reach the caller unchanged.
#[derive(Debug, Error)]
pub enum ChurnError {
    #[error("unknown commit {oid}")]
    UnknownCommit { oid: String },

    #[error("malformed diff for commit {commit}: {reason}")]
    MalformedDiff { commit: String, reason: String },

    #[error("diff records out of order: '{path}' does not sort after '{previous}'")]
    UnsortedDiff { previous: String, path: String },

    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

impl ChurnError {
    pub fn unknown_commit(oid: impl ToString) -> Self {
        ChurnError::UnknownCommit {
            oid: oid.to_string(),
        }
    }

    pub fn malformed_diff(commit: impl ToString, reason: impl Into<String>) -> Self {
        ChurnError::MalformedDiff {
            commit: commit.to_string(),
            reason: reason.into(),
        }
    }
}

pub type ChurnResult<T> = Result<T, ChurnError>;
