use crate::common::ChurnTable;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Options applied to every git invocation so the user's configuration
/// cannot sign, pack or otherwise change the fixtures
const GIT_CONFIG: &[&str] = &[
    "-c",
    "commit.gpgsign=false",
    "-c",
    "gc.auto=0",
    "-c",
    "core.autocrlf=false",
    "-c",
    "init.defaultBranch=main",
];

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    run_git_command(dir.path(), &["init", "-q"]).assert().success();
    run_git_command(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
    dir
}

/// ```text
/// main: C1 (1.txt, a/2.txt) -- C2 (edit 1.txt) -- C3 (add a/b/3.txt)
/// ```
#[fixture]
pub fn linear_repository_dir(repository_dir: TempDir) -> TempDir {
    let dir = repository_dir.path();

    write(dir, "1.txt", "one\n");
    write(dir, "a/2.txt", "two\nzwei\n");
    git_commit(dir, "C1");

    write(dir, "1.txt", "one\nuno\neins\n");
    git_commit(dir, "C2");

    write(dir, "a/b/3.txt", "three\n");
    git_commit(dir, "C3");

    repository_dir
}

/// ```text
///        C2 (feature.txt) --.
///       /                    \
/// C1 ---                      M (merge, no own edits)
///       \                    /
///        C3 (main.txt) -----'
/// ```
#[fixture]
pub fn diamond_repository_dir(repository_dir: TempDir) -> TempDir {
    let dir = repository_dir.path();

    write(dir, "base.txt", "base\n");
    git_commit(dir, "C1");

    run_git_command(dir, &["checkout", "-q", "-b", "feature"])
        .assert()
        .success();
    write(dir, "feature.txt", "feature 1\nfeature 2\n");
    git_commit(dir, "C2");

    run_git_command(dir, &["checkout", "-q", "main"])
        .assert()
        .success();
    write(dir, "main.txt", "main\n");
    write(dir, "base.txt", "base\nmore base\n");
    git_commit(dir, "C3");

    git_merge(dir, &["feature"], "M");

    repository_dir
}

pub fn write(dir: &Path, relative: &str, content: &str) {
    write_file(FileSpec::new(dir.join(relative), content.to_string()));
}

pub fn run_churn_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("git-churn").expect("Failed to find git-churn binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("GIT_CHURN_BACKEND");
    cmd.env_remove("GIT_CHURN_DIR");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run `git-churn` with the given backend
pub fn run_churn_with_backend(dir: &Path, backend: &str, args: &[&str]) -> Command {
    let mut cmd = run_churn_command(dir, args);
    cmd.env("GIT_CHURN_BACKEND", backend);
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.args(GIT_CONFIG);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"),
        ("GIT_COMMITTER_NAME", "fake_user"),
        ("GIT_COMMITTER_EMAIL", "fake_email@email.com"),
        ("GIT_COMMITTER_DATE", "2023-01-01 12:00:00 +0000"),
    ]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Stage everything and commit
pub fn git_commit(dir: &Path, message: &str) {
    run_git_command(dir, &["add", "-A"]).assert().success();
    run_git_command(dir, &["commit", "-q", "--allow-empty", "-m", message])
        .assert()
        .success();
}

/// Merge the given branches into the current one with a merge commit
pub fn git_merge(dir: &Path, branches: &[&str], message: &str) {
    let mut args = vec!["merge", "-q", "--no-ff", "--no-edit", "-m", message];
    args.extend_from_slice(branches);
    run_git_command(dir, &args).assert().success();
}

pub fn rev_parse(dir: &Path, revision: &str) -> String {
    let output = run_git_command(dir, &["rev-parse", revision])
        .output()
        .expect("Failed to run git rev-parse");
    assert!(output.status.success(), "cannot resolve {revision}");

    String::from_utf8(output.stdout)
        .expect("git prints ASCII ids")
        .trim()
        .to_string()
}

/// Reference totals: `git log --numstat` over every non-merge commit in the
/// selection, summed per path
pub fn git_numstat_totals(dir: &Path, revisions: &[&str], paths: &[&str]) -> ChurnTable {
    let mut args = vec![
        "log",
        "--numstat",
        "--format=",
        "--no-merges",
        "--no-renames",
        "--full-history",
    ];
    args.extend_from_slice(revisions);
    args.push("--");
    args.extend_from_slice(paths);

    let output = run_git_command(dir, &args)
        .output()
        .expect("Failed to run git log");
    assert!(output.status.success(), "git log failed");

    let mut totals = ChurnTable::new();
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        let mut fields = line.splitn(3, '\t');
        let (Some(insertions), Some(deletions), Some(path)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let (Ok(insertions), Ok(deletions)) = (insertions.parse::<u64>(), deletions.parse::<u64>())
        else {
            continue;
        };

        let entry = totals.entry(path.to_string()).or_default();
        entry.0 += insertions;
        entry.1 += deletions;
    }

    totals
}
