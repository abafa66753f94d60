use assert_fs::prelude::*;
use predicates::prelude::*;

use crate::common::{TestContext, git, git_available};

/// A repository with a single commit tagged `1.2.0`.
fn tagged_repository(context: &TestContext) -> String {
    git(context.root(), &["init", "--quiet"]);
    context
        .temp_dir
        .child("README.md")
        .write_str("railyard\n")
        .unwrap();
    git(context.root(), &["add", "README.md"]);
    git(context.root(), &["commit", "--quiet", "-m", "Initial commit"]);
    git(context.root(), &["tag", "-a", "1.2.0", "-m", "1.2.0"]);
    git(context.root(), &["rev-parse", "HEAD"])
}

#[test]
fn derive_tagged() {
    if !git_available() {
        return;
    }
    let context = TestContext::new();
    tagged_repository(&context);

    context.derive().assert().success().stdout("1.2.0\n");
    context
        .derive()
        .arg("--source")
        .arg("git")
        .arg("--local")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn derive_after_tag() {
    if !git_available() {
        return;
    }
    let context = TestContext::new();
    tagged_repository(&context);
    context
        .temp_dir
        .child("README.md")
        .write_str("railyard, changed\n")
        .unwrap();
    git(context.root(), &["commit", "--quiet", "-am", "Change"]);
    let head = git(context.root(), &["rev-parse", "HEAD"]);

    context
        .derive()
        .assert()
        .success()
        .stdout(format!("1.2.0+{head}\n"));
    context
        .derive()
        .arg("--public")
        .assert()
        .success()
        .stdout("1.2.0\n");

    context.temp_dir.child("new.txt").touch().unwrap();
    context
        .derive()
        .arg("--local")
        .assert()
        .success()
        .stdout(format!("+{head}.dirty\n"));
}

#[test]
fn derive_from_directory() {
    if !git_available() {
        return;
    }
    let context = TestContext::new();
    let repository = context.temp_dir.child("repository");
    repository.create_dir_all().unwrap();
    git(repository.path(), &["init", "--quiet"]);
    repository.child("README.md").write_str("railyard\n").unwrap();
    git(repository.path(), &["add", "README.md"]);
    git(repository.path(), &["commit", "--quiet", "-m", "Initial commit"]);
    let head = git(repository.path(), &["rev-parse", "HEAD"]);

    context
        .derive()
        .arg("--directory")
        .arg(repository.path())
        .assert()
        .success()
        .stdout(format!("0+{head}\n"));
}

#[test]
fn derive_unknown_source() {
    let context = TestContext::new();
    context
        .derive()
        .arg("--source")
        .arg("setuptools")
        .assert()
        .code(1)
        .stderr("error: No version source named `setuptools`, available sources are git\n");
}

#[test]
fn derive_outside_repository() {
    if !git_available() {
        return;
    }
    let context = TestContext::new();
    let directory = context.temp_dir.child("empty");
    directory.create_dir_all().unwrap();
    context
        .derive()
        .arg("--directory")
        .arg(directory.path())
        .env("GIT_CEILING_DIRECTORIES", context.root())
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with(
            "error: Version source `git` failed",
        ));
}

#[test]
fn derive_public_and_local_conflict() {
    let context = TestContext::new();
    context
        .derive()
        .arg("--public")
        .arg("--local")
        .assert()
        .code(2);
}
