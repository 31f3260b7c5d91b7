use crate::ReportFormat;
use crate::artifacts::churn::commit_diff::CommitDiff;
use crate::artifacts::churn::error::ChurnResult;
use crate::artifacts::churn::history::{FilteredGraph, HistoryGraph, RevisionResolver};
use crate::artifacts::churn::summary::{ChurnReport, ChurnSummary};
use crate::artifacts::churn::traversal::Traversal;
use crate::artifacts::log::path_filter::PathFilter;
use crate::artifacts::log::rev_range::RevisionRange;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct ChurnOptions {
    /// Revision arguments: at most one start plus any `^rev` / `a..b` forms
    pub revisions: Vec<String>,
    /// Paths restricting which files are counted, relative to `prefix`
    pub paths: Vec<String>,
    /// Work tree directory the command runs in, relative to the top of the
    /// work tree with a trailing `/` (`""` at the top)
    pub prefix: String,
    pub format: ReportFormat,
    pub colorize: bool,
}

/// Resolve the selected revisions, aggregate their churn and write the report
pub fn churn<G, W>(provider: &G, opts: &ChurnOptions, writer: &mut W) -> anyhow::Result<()>
where
    G: HistoryGraph + RevisionResolver,
    W: Write,
{
    let diff = aggregate_selection(provider, opts)?;
    write_report(&diff, opts.format, opts.colorize, writer)
}

/// Aggregate churn over the ancestry of the start revision, minus everything
/// reachable from an excluded revision
pub fn aggregate_selection<G>(provider: &G, opts: &ChurnOptions) -> anyhow::Result<CommitDiff>
where
    G: HistoryGraph + RevisionResolver,
{
    let range = RevisionRange::try_parse(&opts.revisions)?;

    let start = resolve(provider, &range.start)?;
    let excluded = range
        .excluded
        .iter()
        .map(|revision| resolve(provider, revision))
        .collect::<anyhow::Result<Vec<_>>>()?;
    tracing::debug!(%start, excluded = excluded.len(), paths = opts.paths.len(), "resolved selection");

    let filter = PathFilter::relative_to(&opts.prefix, &opts.paths)?;
    let diff = if filter.matches_everything() {
        run_traversal(provider, &start, &excluded)?
    } else {
        run_traversal(FilteredGraph::new(provider, filter), &start, &excluded)?
    };

    Ok(diff)
}

fn resolve<G: RevisionResolver>(provider: &G, revision: &str) -> anyhow::Result<ObjectId> {
    provider
        .resolve(revision)
        .with_context(|| format!("unknown revision '{revision}'"))
}

fn run_traversal<G: HistoryGraph>(
    graph: G,
    start: &ObjectId,
    excluded: &[ObjectId],
) -> ChurnResult<CommitDiff> {
    let mut traversal = Traversal::new(graph);
    for commit in excluded {
        traversal.exclude(commit)?;
    }

    let diff = traversal.aggregate(start)?;
    tracing::debug!(stats = ?traversal.stats(), "traversal finished");

    Ok(diff)
}

pub fn write_report<W: Write>(
    diff: &CommitDiff,
    format: ReportFormat,
    colorize: bool,
    writer: &mut W,
) -> anyhow::Result<()> {
    match format {
        ReportFormat::Text => write_text(diff, colorize, writer),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &ChurnReport::new(diff))
                .context("failed to serialize churn report")?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

fn write_text<W: Write>(diff: &CommitDiff, colorize: bool, writer: &mut W) -> anyhow::Result<()> {
    if diff.is_empty() {
        return Ok(());
    }

    for record in diff {
        writeln!(
            writer,
            "{}\t{}\t{}",
            record.insertions, record.deletions, record.path
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "{}", ChurnSummary::from_diff(diff).render(colorize))?;
    writeln!(writer)?;

    Ok(())
}
