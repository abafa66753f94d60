use indoc::indoc;
use predicates::prelude::*;

use crate::common::TestContext;

#[test]
fn sort() {
    let context = TestContext::new();
    context
        .sort()
        .args(["1.0.1", "1.0", "1!0", "1.0rc1", "1.0a1", "1.0.1.post1", "0.9"])
        .assert()
        .success()
        .stdout(indoc! {"
            0.9
            1.0
            1.0a1
            1.0rc1
            1.0.1
            1.0.1.post1
            1!0
        "});
}

#[test]
fn sort_reverse() {
    let context = TestContext::new();
    context
        .sort()
        .args(["v2.0", "10.0", "2.0b1"])
        .arg("--reverse")
        .assert()
        .success()
        .stdout(indoc! {"
            10.0
            2.0b1
            2.0
        "});
}

#[test]
fn sort_non_conforming() {
    let context = TestContext::new();
    context
        .sort()
        .args(["1.0", "2.0", "three"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Version `three` doesn't match"));
}

#[test]
fn sort_requires_versions() {
    let context = TestContext::new();
    context.sort().assert().code(2);
}
