use indoc::indoc;
use predicates::prelude::*;

use crate::common::{DASHED_PATTERN, TestContext};

#[test]
fn parse_canonical() {
    let context = TestContext::new();
    context
        .parse()
        .arg("v2!1.0a1")
        .assert()
        .success()
        .stdout("2!1.0a1\n");

    context
        .parse()
        .arg("1.0.post2+abc.123")
        .assert()
        .success()
        .stdout("1.0.post2+abc.123\n");
}

#[test]
fn parse_json() {
    let context = TestContext::new();
    context
        .parse()
        .arg("1.2.3+abc")
        .arg("--output-format")
        .arg("json")
        .assert()
        .success()
        .stdout(indoc! {r#"
            {
              "version": "1.2.3+abc",
              "public": "1.2.3",
              "local": "+abc",
              "epoch": null,
              "major_release": 1,
              "minor_release": 2,
              "release_cycle": ".",
              "patch_release": 3,
              "post_release": null,
              "dev_release": null,
              "local_identifier": "abc"
            }
        "#});
}

#[test]
fn parse_non_conforming() {
    let context = TestContext::new();
    context
        .parse()
        .arg("not-a-version")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with(
            "error: Version `not-a-version` doesn't match the version pattern",
        ));
}

#[test]
fn parse_invalid_version() {
    let context = TestContext::new();
    context
        .parse()
        .arg("1.99999999999999999999")
        .assert()
        .code(1)
        .stderr(indoc! {"
            error: Couldn't parse `99999999999999999999` as the minor_release of `1.99999999999999999999`
              Caused by: number too large to fit in target type
        "});
}

#[test]
fn parse_custom_pattern() {
    let context = TestContext::new();
    context
        .parse()
        .arg("1~4-2-rc1-post3_linux")
        .arg("--pattern")
        .arg(DASHED_PATTERN)
        .assert()
        .success()
        .stdout("1!4.2rc1.post3+linux\n");

    // The default grammar no longer applies.
    context
        .parse()
        .arg("4.2rc1")
        .arg("--pattern")
        .arg(DASHED_PATTERN)
        .assert()
        .code(1);
}

#[test]
fn parse_pattern_from_environment() {
    let context = TestContext::new();
    context
        .parse()
        .arg("4-2")
        .env("RAILYARD_VERSION_PATTERN", DASHED_PATTERN)
        .assert()
        .success()
        .stdout("4.2\n");
}

#[test]
fn parse_non_conforming_pattern() {
    let context = TestContext::new();
    context
        .parse()
        .arg("1.2")
        .arg("--pattern")
        .arg(r"(?P<major_release>[0-9]+)\.(?P<minor_release>[0-9]+)")
        .assert()
        .code(1)
        .stderr(indoc! {"
            error: Version pattern must define all required capture groups, missing epoch, release_cycle, patch_release, post_release, dev_release, and local_identifier
        "});
}

#[test]
fn parse_quiet() {
    let context = TestContext::new();
    context
        .parse()
        .arg("1.2.3")
        .arg("--quiet")
        .assert()
        .success()
        .stdout("");

    context
        .parse()
        .arg("latest")
        .arg("--quiet")
        .assert()
        .code(1)
        .stderr("");
}

#[test]
fn parse_verbose() {
    let context = TestContext::new();
    context
        .parse()
        .arg("1.2.3")
        .arg("--verbose")
        .assert()
        .success()
        .stdout("1.2.3\n")
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn version_flag() {
    let context = TestContext::new();
    context
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("railyard "));

    // Subcommands take a positional version, not a `--version` flag.
    context
        .parse()
        .arg("--version")
        .assert()
        .code(2);
}

#[test]
fn parse_detailed_logging() {
    let context = TestContext::new();
    context
        .parse()
        .arg("1.2.3")
        .arg("-vv")
        .assert()
        .success()
        .stdout("1.2.3\n")
        .stderr(predicate::str::contains("DEBUG railyard Resolved settings"));
}
