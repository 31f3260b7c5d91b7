use anyhow::Context;
use churn::areas::git_cli::GitCli;
use churn::areas::repository::Repository;
use churn::artifacts::core::{PagerWriter, should_page, stdout_is_terminal};
use churn::commands::porcelain::churn::{self as churn_command, ChurnOptions};
use churn::{Backend, ReportFormat};
use clap::Parser;
use minus::Pager;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter (`debug`, `churn=trace`, ...)
const LOG_ENV: &str = "GIT_CHURN_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "git-churn",
    version,
    author = "Sami Barbut-Dica",
    about = "Per-file line churn across the ancestry of a commit",
    long_about = "Counts, for every file, the lines inserted and deleted by each commit \
    reachable from the given revision. Every ancestor is counted once; merge commits \
    contribute only what their parents carry.",
    disable_version_flag = true,
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        value_name = "revision",
        help = "Starting revision, or exclusions such as ^<rev> and <a>..<b> (default HEAD)"
    )]
    revisions: Vec<String>,

    #[arg(
        last = true,
        value_name = "path",
        help = "Only count files equal to or below these paths"
    )]
    paths: Vec<String>,

    #[arg(
        short = 'C',
        value_name = "dir",
        env = "GIT_CHURN_DIR",
        help = "Run as if started in <dir>"
    )]
    dir: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        env = "GIT_CHURN_BACKEND",
        default_value_t = Backend::Git,
        help = "Where history is read from"
    )]
    backend: Backend,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text, help = "Report format")]
    format: ReportFormat,

    #[arg(short = 'v', long, action = clap::ArgAction::Version, help = "Print version")]
    version: (),
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn render(cli: Cli, colorize: bool) -> anyhow::Result<Vec<u8>> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };
    let mut opts = ChurnOptions {
        revisions: cli.revisions,
        paths: cli.paths,
        prefix: String::new(),
        format: cli.format,
        colorize,
    };
    tracing::debug!(backend = ?cli.backend, dir = %dir.display(), "starting");

    let mut report = Vec::new();
    match cli.backend {
        Backend::Git => {
            let git = GitCli::open(&dir)?;
            opts.prefix = git.worktree_prefix()?;
            churn_command::churn(&git, &opts, &mut report)?
        }
        Backend::Objects => {
            let repository = Repository::open(&dir)?;
            opts.prefix = repository.worktree_prefix()?;
            churn_command::churn(&repository, &opts, &mut report)?
        }
    }

    Ok(report)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let report = render(cli, stdout_is_terminal())?;
    if report.is_empty() {
        return Ok(());
    }

    if should_page() {
        let pager = Pager::new();
        let mut writer = PagerWriter::new(pager.clone());
        writer.write_all(&report)?;
        minus::page_all(pager).context("failed to run the pager")?;
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&report)?;
        stdout.flush()?;
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
