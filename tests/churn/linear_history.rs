use crate::common::command::{
    git_commit, linear_repository_dir, repository_dir, run_churn_with_backend, write,
};
use crate::common::{ChurnTable, parse_report};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn churn_of_linear_history_sums_every_commit(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected_output = "3\t0\t1.txt\n\
        2\t0\ta/2.txt\n\
        1\t0\ta/b/3.txt\n\
        \n\
        3 files changed, 6 insertions(+)\n\
        \n";

    run_churn_with_backend(linear_repository_dir.path(), backend, &[])
        .assert()
        .success()
        .stdout(expected_output);

    Ok(())
}

#[rstest]
fn churn_from_middle_of_history(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
    #[values("HEAD~1", "HEAD^", "main~")] revision: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_churn_with_backend(linear_repository_dir.path(), backend, &[revision])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = ChurnTable::from([
        ("1.txt".to_string(), (3, 0)),
        ("a/2.txt".to_string(), (2, 0)),
    ]);
    assert_eq!(parse_report(&String::from_utf8(output)?), expected);

    Ok(())
}

#[rstest]
fn churn_of_root_commit_counts_every_line(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(linear_repository_dir.path(), backend, &["HEAD~2"])
        .assert()
        .success()
        .stdout("1\t0\t1.txt\n2\t0\ta/2.txt\n\n2 files changed, 3 insertions(+)\n\n");

    Ok(())
}

#[rstest]
fn edits_and_deletions_accumulate_per_file(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    write(dir, "notes.md", "alpha\nbeta\ngamma\n");
    git_commit(dir, "add notes");
    write(dir, "notes.md", "alpha\nBETA\ngamma\ndelta\n");
    git_commit(dir, "edit notes");
    std::fs::remove_file(dir.join("notes.md"))?;
    git_commit(dir, "drop notes");

    run_churn_with_backend(dir, backend, &[])
        .assert()
        .success()
        .stdout("5\t5\tnotes.md\n\n1 file changed, 5 insertions(+), 5 deletions(-)\n\n");

    Ok(())
}

#[rstest]
fn empty_commits_contribute_nothing(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    git_commit(dir, "empty root");
    git_commit(dir, "still empty");

    run_churn_with_backend(dir, backend, &[])
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[rstest]
fn runs_from_a_subdirectory(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(&linear_repository_dir.path().join("a"), backend, &[])
        .assert()
        .success()
        .stdout(predicates::str::contains("3 files changed, 6 insertions(+)"));

    Ok(())
}

#[rstest]
fn repository_directory_can_be_given_explicitly(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let elsewhere = TempDir::new()?;
    let repository = linear_repository_dir.path().display().to_string();

    run_churn_with_backend(elsewhere.path(), backend, &["-C", &repository])
        .assert()
        .success()
        .stdout(predicates::str::contains("3 files changed, 6 insertions(+)"));

    Ok(())
}
