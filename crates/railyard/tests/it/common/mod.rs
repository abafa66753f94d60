use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;

pub(crate) const BIN_NAME: &str = "railyard";

/// A pattern that separates segments with dashes, e.g., `1-2-rc3-post4`.
pub(crate) const DASHED_PATTERN: &str = concat!(
    r"(?:(?P<epoch>[0-9]+)~)?",
    r"(?P<major_release>[0-9]+)",
    r"(?:-(?P<minor_release>[0-9]+))?",
    r"(?:-(?P<release_cycle>a|b|rc|\.)(?P<patch_release>[0-9]+))?",
    r"(?:-post(?P<post_release>[0-9]+))?",
    r"(?:-dev(?P<dev_release>[0-9]+))?",
    r"(?:_(?P<local_identifier>[a-z0-9.]+))?",
);

/// A temporary working directory and the environment to run `railyard` in.
pub(crate) struct TestContext {
    pub(crate) temp_dir: TempDir,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    pub(crate) fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A `railyard` command running in the temporary directory, isolated from the environment
    /// of the test run.
    pub(crate) fn command(&self) -> Command {
        let mut command = Command::cargo_bin(BIN_NAME).expect("Failed to find the binary");
        command
            .current_dir(self.root())
            .env_remove("RAILYARD_CONFIG_FILE")
            .env_remove("RAILYARD_NO_CONFIG")
            .env_remove("RAILYARD_VERSION_PATTERN")
            .env_remove("RUST_LOG");
        command
    }

    pub(crate) fn parse(&self) -> Command {
        let mut command = self.command();
        command.arg("parse");
        command
    }

    pub(crate) fn compare(&self) -> Command {
        let mut command = self.command();
        command.arg("compare");
        command
    }

    pub(crate) fn sort(&self) -> Command {
        let mut command = self.command();
        command.arg("sort");
        command
    }

    pub(crate) fn bump(&self) -> Command {
        let mut command = self.command();
        command.arg("bump");
        command
    }

    pub(crate) fn validate_pattern(&self) -> Command {
        let mut command = self.command();
        command.arg("validate-pattern");
        command
    }

    pub(crate) fn derive(&self) -> Command {
        let mut command = self.command();
        command.arg("derive");
        command
    }
}

/// Whether a `git` executable is available to the tests.
pub(crate) fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Run `git` in the given directory, with an identity for committing.
pub(crate) fn git(cwd: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args([
            "-c",
            "user.name=railyard",
            "-c",
            "user.email=railyard@example.com",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run git");
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout)
        .expect("git output is not UTF-8")
        .trim()
        .to_string()
}
