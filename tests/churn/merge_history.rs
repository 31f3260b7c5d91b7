use crate::common::command::{
    diamond_repository_dir, git_commit, git_merge, repository_dir, run_churn_with_backend,
    run_git_command, write,
};
use crate::common::file::numbered_lines;
use assert_fs::TempDir;
use rstest::rstest;
use std::path::Path;

fn checkout(dir: &Path, args: &[&str]) {
    let mut command = vec!["checkout", "-q"];
    command.extend_from_slice(args);
    run_git_command(dir, &command).assert().success();
}

#[rstest]
fn merge_commit_contributes_only_its_parents(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(diamond_repository_dir.path(), backend, &[])
        .assert()
        .success()
        .stdout(
            "2\t0\tbase.txt\n\
            2\t0\tfeature.txt\n\
            1\t0\tmain.txt\n\
            \n\
            3 files changed, 5 insertions(+)\n\
            \n",
        );

    Ok(())
}

#[rstest]
fn shared_ancestor_is_counted_once(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // base.txt would read 3 insertions if C1 were visited through both sides
    run_churn_with_backend(diamond_repository_dir.path(), backend, &["HEAD"])
        .assert()
        .success()
        .stdout(predicates::str::starts_with("2\t0\tbase.txt\n"));

    Ok(())
}

#[rstest]
fn second_parent_side_is_walked(
    diamond_repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_churn_with_backend(diamond_repository_dir.path(), backend, &["HEAD^2"])
        .assert()
        .success()
        .stdout("1\t0\tbase.txt\n2\t0\tfeature.txt\n\n2 files changed, 3 insertions(+)\n\n");

    Ok(())
}

/// Conflict resolution edits made in a merge commit are not counted
#[rstest]
fn changes_made_while_merging_are_ignored(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    write(dir, "shared.txt", &numbered_lines("line", 3));
    git_commit(dir, "C1");

    checkout(dir, &["-b", "side"]);
    write(dir, "side.txt", "side\n");
    git_commit(dir, "side work");

    checkout(dir, &["main"]);
    write(dir, "main.txt", "main\n");
    git_commit(dir, "main work");

    run_git_command(dir, &["merge", "-q", "--no-ff", "--no-commit", "side"])
        .assert()
        .success();
    write(dir, "shared.txt", &numbered_lines("rewritten", 3));
    run_git_command(dir, &["add", "-A"]).assert().success();
    run_git_command(dir, &["commit", "-q", "-m", "evil merge"])
        .assert()
        .success();

    run_churn_with_backend(dir, backend, &[])
        .assert()
        .success()
        .stdout(
            "1\t0\tmain.txt\n\
            3\t0\tshared.txt\n\
            1\t0\tside.txt\n\
            \n\
            3 files changed, 5 insertions(+)\n\
            \n",
        );

    Ok(())
}

/// ```text
///   A --- B --- M1 --- M3
///    \     \   /      /
///     \     `-X-.    /
///      \   /     \  /
///       C ------- M2
/// ```
#[rstest]
fn criss_cross_merges_count_each_commit_once(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    write(dir, "a.txt", "a\n");
    git_commit(dir, "A");

    checkout(dir, &["-b", "left"]);
    write(dir, "b.txt", "b\n");
    git_commit(dir, "B");

    checkout(dir, &["-b", "right", "main"]);
    write(dir, "c.txt", "c 1\nc 2\n");
    git_commit(dir, "C");

    checkout(dir, &["left"]);
    git_merge(dir, &["right"], "M1");

    checkout(dir, &["right"]);
    git_merge(dir, &["left~1"], "M2");

    checkout(dir, &["left"]);
    git_merge(dir, &["right"], "M3");

    run_churn_with_backend(dir, backend, &[])
        .assert()
        .success()
        .stdout(
            "1\t0\ta.txt\n\
            1\t0\tb.txt\n\
            2\t0\tc.txt\n\
            \n\
            3 files changed, 4 insertions(+)\n\
            \n",
        );

    Ok(())
}

#[rstest]
fn octopus_merge_walks_every_parent(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    write(dir, "base.txt", "base\n");
    git_commit(dir, "base");

    for branch in ["one", "two", "three"] {
        checkout(dir, &["-b", branch, "main"]);
        write(dir, &format!("{branch}.txt"), &numbered_lines(branch, 2));
        git_commit(dir, branch);
    }

    checkout(dir, &["main"]);
    git_merge(dir, &["one", "two", "three"], "octopus");

    run_churn_with_backend(dir, backend, &[])
        .assert()
        .success()
        .stdout(
            "1\t0\tbase.txt\n\
            2\t0\tone.txt\n\
            2\t0\tthree.txt\n\
            2\t0\ttwo.txt\n\
            \n\
            4 files changed, 7 insertions(+)\n\
            \n",
        );

    Ok(())
}
