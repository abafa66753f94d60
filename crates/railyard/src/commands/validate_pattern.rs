use std::fmt::Write;

use anyhow::Result;
use owo_colors::OwoColorize;

use railyard_version::VersionPattern;

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// Check that a custom pattern compiles and defines every required capture group.
pub(crate) fn validate_pattern(pattern: &str, printer: Printer) -> Result<ExitStatus> {
    if let Err(err) = VersionPattern::new(pattern) {
        return user_error(err, printer);
    }

    writeln!(
        printer.stderr(),
        "Version pattern `{}` is valid",
        pattern.cyan()
    )?;

    Ok(ExitStatus::Success)
}
