use crate::common::command::{
    diamond_repository_dir, linear_repository_dir, rev_parse, run_churn_with_backend,
    run_git_command,
};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn range_expression_excludes_reachable_commits(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
    #[values(&["HEAD~2..HEAD"][..], &["HEAD~2.."][..], &["^HEAD~2"][..], &["HEAD", "^HEAD~2"][..])]
    revisions: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(linear_repository_dir.path(), backend, revisions)
        .assert()
        .success()
        .stdout("2\t0\t1.txt\n1\t0\ta/b/3.txt\n\n2 files changed, 3 insertions(+)\n\n");

    Ok(())
}

#[rstest]
fn excluding_the_start_itself_prints_nothing(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(linear_repository_dir.path(), backend, &["HEAD..HEAD"])
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[rstest]
fn range_with_default_end_is_relative_to_head(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // everything the feature branch brought in is excluded
    run_churn_with_backend(diamond_repository_dir.path(), backend, &["feature.."])
        .assert()
        .success()
        .stdout("1\t0\tbase.txt\n1\t0\tmain.txt\n\n2 files changed, 2 insertions(+)\n\n");

    Ok(())
}

#[rstest]
fn range_with_default_start_excludes_head(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(diamond_repository_dir.path(), backend, &["..feature"])
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[rstest]
fn multiple_exclusions_combine(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(
        diamond_repository_dir.path(),
        backend,
        &["HEAD", "^HEAD^1", "^feature"],
    )
    .assert()
    .success()
    .stdout("");

    Ok(())
}

#[rstest]
fn start_can_be_a_full_or_abbreviated_id(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
    #[values(40, 7)] length: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();
    let sha = rev_parse(dir, "HEAD~1");

    run_churn_with_backend(dir, backend, &[&sha[..length]])
        .assert()
        .success()
        .stdout(predicates::str::contains("2 files changed, 5 insertions(+)"));

    Ok(())
}

#[rstest]
fn tags_resolve_to_their_commit(
    linear_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
    #[values(&["tag", "light", "HEAD~1"][..], &["tag", "-a", "-m", "annotated", "heavy", "HEAD~1"][..])]
    tag_command: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();
    run_git_command(dir, tag_command).assert().success();
    let tag_name = tag_command[tag_command.len() - 2];

    run_churn_with_backend(dir, backend, &[tag_name])
        .assert()
        .success()
        .stdout(predicates::str::contains("2 files changed, 5 insertions(+)"));

    Ok(())
}

#[rstest]
fn branch_names_resolve(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
    #[values("feature", "refs/heads/feature", "heads/feature")] revision: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(diamond_repository_dir.path(), backend, &[revision])
        .assert()
        .success()
        .stdout("1\t0\tbase.txt\n2\t0\tfeature.txt\n\n2 files changed, 3 insertions(+)\n\n");

    Ok(())
}

#[rstest]
fn packed_refs_resolve(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diamond_repository_dir.path();
    run_git_command(dir, &["pack-refs", "--all"]).assert().success();

    run_churn_with_backend(dir, backend, &["feature"])
        .assert()
        .success()
        .stdout(predicates::str::contains("2 files changed, 3 insertions(+)"));

    Ok(())
}
