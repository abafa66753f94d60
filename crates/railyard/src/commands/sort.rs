use std::fmt::Write;

use anyhow::Result;

use railyard_version::{VersionParser, VersionPattern};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// Print versions in ascending order, or descending with `reverse`.
pub(crate) fn sort(
    versions: &[String],
    reverse: bool,
    pattern: &VersionPattern,
    printer: Printer,
) -> Result<ExitStatus> {
    let parser = VersionParser::default();
    let mut parsed = Vec::with_capacity(versions.len());
    for version in versions {
        match parser.parse_with(version, pattern) {
            Ok(version) => parsed.push(version),
            Err(err) => return user_error(err, printer),
        }
    }

    parsed.sort();
    if reverse {
        parsed.reverse();
    }

    let mut stdout = printer.stdout();
    for version in &parsed {
        writeln!(stdout, "{version}")?;
    }

    Ok(ExitStatus::Success)
}
