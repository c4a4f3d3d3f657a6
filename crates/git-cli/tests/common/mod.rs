//! Shared test harness for gitbrute end-to-end tests.
//!
//! Provides process runners and repo setup utilities. Environment variables
//! are pinned so commits, and therefore the search, are deterministic across
//! machines and CI runners.

#![allow(dead_code)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

// ──────────────────────────── Types ────────────────────────────

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

// ──────────────────────────── Binary Discovery ────────────────────────────

/// Path to the compiled `gitbrute` binary.
pub fn gitbrute_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gitbrute"))
}

// ──────────────────────────── Process Runners ────────────────────────────

/// Apply the full set of pinned environment variables to a `Command`.
fn pin_env(cmd: &mut Command, dir: &Path) {
    cmd.env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_AUTHOR_DATE", "1234567890 +0000")
        .env("GIT_COMMITTER_NAME", "Test Committer")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_DATE", "1234567890 +0000")
        .env("TZ", "UTC")
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir.parent().unwrap_or(dir))
        .env_remove("GITBRUTE_PATTERN")
        .env_remove("GITBRUTE_CPUS")
        .env_remove("GITBRUTE_NONCE_NAME")
        .env_remove("GITBRUTE_NONCE_CHARS")
        .env_remove("RUST_LOG");
}

fn capture(mut cmd: Command, what: &str) -> CommandResult {
    let output = cmd
        .output()
        .unwrap_or_else(|e| panic!("failed to run {what}: {e}"));
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

/// Run C git in `dir` with the given arguments.
pub fn git(dir: &Path, args: &[&str]) -> CommandResult {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    capture(cmd, "git")
}

/// Run the gitbrute binary in `dir` with the given arguments.
pub fn gitbrute(dir: &Path, args: &[&str]) -> CommandResult {
    gitbrute_os(dir, args)
}

/// Like [`gitbrute`], for arguments that need not be valid Unicode.
pub fn gitbrute_os<S: AsRef<OsStr>>(dir: &Path, args: &[S]) -> CommandResult {
    let mut cmd = Command::new(gitbrute_bin());
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    capture(cmd, "gitbrute")
}

/// Run gitbrute with extra environment variables.
pub fn gitbrute_with_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> CommandResult {
    let mut cmd = Command::new(gitbrute_bin());
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    for (key, val) in env {
        cmd.env(key, val);
    }
    capture(cmd, "gitbrute")
}

// ──────────────────────────── Repo Setup ────────────────────────────

/// Create a repo with a single commit. Returns the tempdir guard and the repo path.
pub fn setup_repo() -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("repo");
    std::fs::create_dir(&dir).unwrap();

    assert_success(&git(&dir, &["init", "-q"]));
    std::fs::write(dir.join("hello.txt"), "hello world\n").unwrap();
    assert_success(&git(&dir, &["add", "hello.txt"]));
    assert_success(&git(&dir, &["commit", "-q", "-m", "initial commit"]));
    (tmp, dir)
}

/// `git rev-parse HEAD`, trimmed.
pub fn head(dir: &Path) -> String {
    let result = git(dir, &["rev-parse", "HEAD"]);
    assert_success(&result);
    result.stdout.trim().to_string()
}

/// `git cat-file commit <rev>`.
pub fn commit_content(dir: &Path, rev: &str) -> String {
    let result = git(dir, &["cat-file", "commit", rev]);
    assert_success(&result);
    result.stdout
}

/// Value of the header field `name` in the HEAD commit, if present.
pub fn header_field(dir: &Path, name: &str) -> Option<String> {
    let content = commit_content(dir, "HEAD");
    let prefix = format!("{name} ");
    content
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix(prefix.as_str()).map(str::to_owned))
}

// ──────────────────────────── Assertion Helpers ────────────────────────────

pub fn assert_success(result: &CommandResult) {
    assert_eq!(
        result.exit_code, 0,
        "command failed\nstdout:\n{}\nstderr:\n{}",
        result.stdout, result.stderr
    );
}

/// Run `git fsck --full` and assert it passes cleanly.
pub fn assert_fsck_clean(dir: &Path) {
    assert_success(&git(dir, &["fsck", "--full"]));
}
