use predicates::prelude::*;

use crate::common::{DASHED_PATTERN, TestContext};

#[test]
fn compare() {
    let context = TestContext::new();
    for (left, right, expected) in [
        ("1.0", "1.0a1", "<\n"),
        ("1.0rc1", "1.0.1", "<\n"),
        ("1.0.1", "v1.0.1", "==\n"),
        ("1!0", "9.9", ">\n"),
        ("1.0+abc", "1.0", ">\n"),
        ("1.0.dev0", "1.0", ">\n"),
    ] {
        context
            .compare()
            .arg(left)
            .arg(right)
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn compare_custom_pattern() {
    let context = TestContext::new();
    context
        .compare()
        .arg("2-1-b3")
        .arg("2-1-a9")
        .arg("--pattern")
        .arg(DASHED_PATTERN)
        .assert()
        .success()
        .stdout(">\n");
}

#[test]
fn compare_non_conforming() {
    let context = TestContext::new();
    context
        .compare()
        .arg("1.0")
        .arg("one")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Version `one` doesn't match"));
}
