use assert_fs::prelude::*;
use indoc::indoc;
use predicates::prelude::*;

use crate::common::{DASHED_PATTERN, TestContext};

#[test]
fn pattern_from_config() {
    let context = TestContext::new();
    context
        .temp_dir
        .child("railyard.toml")
        .write_str(&format!("pattern = '{DASHED_PATTERN}'\n"))
        .unwrap();
    let nested = context.temp_dir.child("nested");
    nested.create_dir_all().unwrap();

    context
        .parse()
        .arg("1-2-rc3")
        .current_dir(nested.path())
        .assert()
        .success()
        .stdout("1.2rc3\n");

    // The configuration file can be ignored.
    context
        .parse()
        .arg("1-2-rc3")
        .arg("--no-config")
        .assert()
        .code(1);
    context
        .parse()
        .arg("1-2-rc3")
        .env("RAILYARD_NO_CONFIG", "1")
        .assert()
        .code(1);

    // The command line takes precedence.
    context
        .parse()
        .arg("1.2rc3")
        .arg("--pattern")
        .arg(r"v?(?:(?P<epoch>[0-9]+)!)?(?P<major_release>[0-9]+)(?:\.(?P<minor_release>[0-9]+))?(?:(?P<release_cycle>\.|a|b|rc)(?P<patch_release>[0-9]+))?(?:\.post(?P<post_release>[0-9]+))?(?:\.dev(?P<dev_release>[0-9]+))?(?:\+(?P<local_identifier>[a-zA-Z0-9.]+))?")
        .assert()
        .success()
        .stdout("1.2rc3\n");
}

#[test]
fn explicit_config_file() {
    let context = TestContext::new();
    let config = context.temp_dir.child("ci").child("versions.toml");
    config
        .write_str(indoc! {r#"
            source = "setuptools"
        "#})
        .unwrap();

    context
        .derive()
        .arg("--config-file")
        .arg(config.path())
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "error: No version source named `setuptools`",
        ));
    context
        .derive()
        .env("RAILYARD_CONFIG_FILE", config.path())
        .assert()
        .code(1);
}

#[test]
fn invalid_config() {
    let context = TestContext::new();
    context
        .temp_dir
        .child("railyard.toml")
        .write_str(indoc! {r#"
            pattern = "[0-9]+"
        "#})
        .unwrap();

    context
        .parse()
        .arg("1.0")
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: Invalid `pattern` in `"))
        .stderr(predicate::str::ends_with(indoc! {"
            railyard.toml`
              Caused by: Version pattern must define all required capture groups, missing epoch, major_release, minor_release, release_cycle, patch_release, post_release, dev_release, and local_identifier
        "}));
}

#[test]
fn unknown_config_field() {
    let context = TestContext::new();
    context
        .temp_dir
        .child("railyard.toml")
        .write_str("sources = []\n")
        .unwrap();

    context
        .parse()
        .arg("1.0")
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: Failed to parse: `"));
}
