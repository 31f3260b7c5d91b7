use crate::common::command::{git_commit, repository_dir, run_churn_with_backend, run_git_command, write};
use crate::common::file::write_bytes;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn binary_files_are_left_out(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    write_bytes(dir.join("logo.png"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR");
    write(dir, "readme.txt", "read me\n");
    git_commit(dir, "add files");
    write_bytes(dir.join("logo.png"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0");
    git_commit(dir, "edit logo");

    run_churn_with_backend(dir, backend, &[])
        .assert()
        .success()
        .stdout("1\t0\treadme.txt\n\n1 file changed, 1 insertion(+)\n\n");

    Ok(())
}

#[rstest]
fn mode_change_is_reported_without_lines(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    write(dir, "run.sh", "#!/bin/sh\necho hi\n");
    git_commit(dir, "add script");
    run_git_command(dir, &["update-index", "--chmod=+x", "run.sh"])
        .assert()
        .success();
    run_git_command(dir, &["commit", "-q", "-m", "make executable"])
        .assert()
        .success();

    run_churn_with_backend(dir, backend, &["HEAD^..HEAD"])
        .assert()
        .success()
        .stdout("0\t0\trun.sh\n\n1 file changed\n\n");

    Ok(())
}

#[rstest]
fn file_without_trailing_newline_counts_its_last_line(
    repository_dir: TempDir,
    #[values("git", "objects")] backend: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    write(dir, "poem.txt", "roses\nviolets");
    git_commit(dir, "draft");
    write(dir, "poem.txt", "roses\nviolets\n");
    git_commit(dir, "newline");

    run_churn_with_backend(dir, backend, &["HEAD^..HEAD"])
        .assert()
        .success()
        .stdout("1\t1\tpoem.txt\n\n1 file changed, 1 insertion(+), 1 deletion(-)\n\n");

    Ok(())
}
