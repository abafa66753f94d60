use indoc::indoc;

use crate::common::{DASHED_PATTERN, TestContext};

#[test]
fn valid_pattern() {
    let context = TestContext::new();
    context
        .validate_pattern()
        .arg(DASHED_PATTERN)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn missing_groups() {
    let context = TestContext::new();
    context
        .validate_pattern()
        .arg(concat!(
            r"(?P<major_release>[0-9]+)",
            r"(?:\.(?P<minor_release>[0-9]+))?",
            r"(?:(?P<release_cycle>\.|a|b|rc)(?P<patch_release>[0-9]+))?",
            r"(?:\.post(?P<post_release>[0-9]+))?",
            r"(?:\+(?P<local_identifier>[a-z0-9.]+))?",
        ))
        .assert()
        .code(1)
        .stderr(indoc! {"
            error: Version pattern must define all required capture groups, missing epoch and dev_release
        "});
}

#[test]
fn invalid_regex() {
    let context = TestContext::new();
    context
        .validate_pattern()
        .arg("(?P<epoch>[0-9]+")
        .assert()
        .code(1)
        .stderr(predicates::str::starts_with(
            "error: Invalid version pattern `(?P<epoch>[0-9]+`\n  Caused by: regex parse error:",
        ));
}
