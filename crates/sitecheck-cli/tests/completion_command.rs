use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn sitecheck() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin("sitecheck"))
}

#[test]
fn test_completion_command_help() {
    let mut cmd = sitecheck();
    cmd.arg("completion").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completion scripts"))
        .stdout(predicate::str::contains("SUPPORTED SHELLS"))
        .stdout(predicate::str::contains("~/.bashrc"));
}

#[test]
fn test_completion_bash_generates_script() {
    let mut cmd = sitecheck();
    cmd.arg("completion").arg("--shell").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_sitecheck()"))
        .stdout(predicate::str::contains("complete -F _sitecheck"));
}

#[test]
fn test_completion_zsh_generates_script() {
    let mut cmd = sitecheck();
    cmd.arg("completion").arg("--shell").arg("zsh");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#compdef sitecheck"));
}

#[test]
fn test_completion_requires_shell_flag() {
    let mut cmd = sitecheck();
    cmd.arg("completion");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_main_help_lists_commands() {
    let mut cmd = sitecheck();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("lighthouse"))
        .stdout(predicate::str::contains("seo"))
        .stdout(predicate::str::contains("completion"));
}
