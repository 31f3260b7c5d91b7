use crate::artifacts::churn::commit_diff::{CommitDiff, FileChurn};
use colored::Colorize;
use serde::Serialize;
use std::fmt;

/// Totals over an aggregated diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChurnSummary {
    pub files_changed: usize,
    pub insertions: u64,
    pub deletions: u64,
}

impl ChurnSummary {
    pub fn from_diff(diff: &CommitDiff) -> Self {
        ChurnSummary {
            files_changed: diff.len(),
            insertions: diff.total_insertions(),
            deletions: diff.total_deletions(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files_changed == 0
    }

    /// `N file(s) changed, X insertion(s)(+), Y deletion(s)(-)`, with the
    /// insertion and deletion clauses left out when they are zero.
    pub fn render(&self, colorize: bool) -> String {
        let mut line = format!(
            "{} {} changed",
            self.files_changed,
            plural(self.files_changed as u64, "file")
        );

        if self.insertions > 0 {
            let count = self.insertions.to_string();
            let count = if colorize {
                count.green().to_string()
            } else {
                count
            };
            line.push_str(&format!(
                ", {count} {}(+)",
                plural(self.insertions, "insertion")
            ));
        }

        if self.deletions > 0 {
            let count = self.deletions.to_string();
            let count = if colorize {
                count.red().to_string()
            } else {
                count
            };
            line.push_str(&format!(
                ", {count} {}(-)",
                plural(self.deletions, "deletion")
            ));
        }

        line
    }
}

impl fmt::Display for ChurnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// Machine readable report: every file record plus the totals
#[derive(Debug, Serialize)]
pub struct ChurnReport<'a> {
    pub files: &'a [FileChurn],
    #[serde(flatten)]
    pub summary: ChurnSummary,
}

impl<'a> ChurnReport<'a> {
    pub fn new(diff: &'a CommitDiff) -> Self {
        ChurnReport {
            files: diff.records(),
            summary: ChurnSummary::from_diff(diff),
        }
    }
}
