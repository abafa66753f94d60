use indoc::indoc;

use crate::common::{DASHED_PATTERN, TestContext};

#[test]
fn bump_increment() {
    let context = TestContext::new();
    for (version, segment, expected) in [
        ("1.2.3.post1", "minor", "1.3\n"),
        ("1.2.3", "major", "2\n"),
        ("1.2.3", "patch", "1.2.4\n"),
        ("1.2", "patch", "1.2.0\n"),
        ("1.2b4", "cycle", "1.2rc0\n"),
        ("1.2", "release_cycle", "1.2a0\n"),
        ("1.2", "dev", "1.2.dev0\n"),
        ("1.2", "epoch", "0!0\n"),
    ] {
        context
            .bump()
            .arg(version)
            .arg(segment)
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn bump_value() {
    let context = TestContext::new();
    for (version, segment, value, expected) in [
        ("1.2.3.post1", "minor", "5", "1.5\n"),
        ("1.2a3", "cycle", "rc", "1.2rc0\n"),
        ("1.2a3", "cycle", "1", "1.2b0\n"),
        ("1.2", "local", "build.7", "1.2+build.7\n"),
        ("1.2.3", "minor", "2", "1.2.3\n"),
    ] {
        context
            .bump()
            .arg(version)
            .arg(segment)
            .arg("--value")
            .arg(value)
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn bump_custom_pattern() {
    let context = TestContext::new();
    context
        .bump()
        .arg("3-1-rc2")
        .arg("minor")
        .arg("--pattern")
        .arg(DASHED_PATTERN)
        .assert()
        .success()
        .stdout("3.2\n");
}

#[test]
fn bump_decrement() {
    let context = TestContext::new();
    context
        .bump()
        .arg("1.2.3")
        .arg("minor")
        .arg("--value")
        .arg("1")
        .assert()
        .code(1)
        .stdout("")
        .stderr(indoc! {"
            error: Version segments cannot be decremented, minor_release is `2` and cannot be set to `1`
        "});
}

#[test]
fn bump_final_release_cycle() {
    let context = TestContext::new();
    context
        .bump()
        .arg("1.2.3")
        .arg("cycle")
        .assert()
        .code(1)
        .stderr(indoc! {"
            error: The release cycle is already `.`, the final stage
        "});
}

#[test]
fn bump_invalid_value() {
    let context = TestContext::new();
    context
        .bump()
        .arg("1.2.3")
        .arg("cycle")
        .arg("--value")
        .arg("gamma")
        .assert()
        .code(1)
        .stderr(indoc! {"
            error: No release cycle with alias 'gamma', must be one of a, b, rc, .
        "});

    context
        .bump()
        .arg("1.2.3")
        .arg("local")
        .arg("--value")
        .arg("not-allowed")
        .assert()
        .code(1)
        .stderr(indoc! {"
            error: Local identifier `not-allowed` may only contain ASCII letters, digits, and dots
        "});
}

#[test]
fn bump_unknown_segment() {
    let context = TestContext::new();
    context
        .bump()
        .arg("1.2.3")
        .arg("micro")
        .assert()
        .code(2);
}
