use crate::common::command::{linear_repository_dir, repository_dir, run_churn_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn json_report_lists_files_and_totals(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_churn_command(linear_repository_dir.path(), &["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;

    assert_eq!(
        report,
        serde_json::json!({
            "files": [
                {"path": "1.txt", "insertions": 3, "deletions": 0},
                {"path": "a/2.txt", "insertions": 2, "deletions": 0},
                {"path": "a/b/3.txt", "insertions": 1, "deletions": 0},
            ],
            "files_changed": 3,
            "insertions": 6,
            "deletions": 0,
        })
    );

    Ok(())
}

#[rstest]
fn json_report_for_empty_selection_has_zero_totals(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_churn_command(
        linear_repository_dir.path(),
        &["--format", "json", "HEAD..HEAD"],
    )
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;

    assert_eq!(report["files"], serde_json::json!([]));
    assert_eq!(report["files_changed"], 0);

    Ok(())
}

#[rstest]
fn summary_uses_singular_nouns(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    crate::common::command::write(dir, "only.txt", "old\n");
    crate::common::command::git_commit(dir, "add");
    crate::common::command::write(dir, "only.txt", "new\n");
    crate::common::command::git_commit(dir, "edit");

    run_churn_command(dir, &["HEAD^..HEAD"])
        .assert()
        .success()
        .stdout("1\t1\tonly.txt\n\n1 file changed, 1 insertion(+), 1 deletion(-)\n\n");

    Ok(())
}

#[rstest]
fn output_is_not_coloured_when_piped(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_command(linear_repository_dir.path(), &[])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());

    Ok(())
}

#[rstest]
#[case("--version")]
#[case("-v")]
fn prints_version(#[case] flag: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    run_churn_command(dir.path(), &[flag])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[rstest]
fn backend_can_be_chosen_on_the_command_line(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_command(linear_repository_dir.path(), &["--backend", backend])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 files changed, 6 insertions(+)"));

    Ok(())
}
