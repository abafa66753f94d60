use std::fmt::Write;

use anyhow::{Result, anyhow};

use railyard_version::{SegmentName, SegmentValue, VersionParser, VersionPattern};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// Set a segment to a higher value, or to its next value if none is given, and print the
/// resulting version.
pub(crate) fn bump(
    version: &str,
    segment: SegmentName,
    value: Option<&str>,
    pattern: &VersionPattern,
    printer: Printer,
) -> Result<ExitStatus> {
    let version = match VersionParser::default().parse_with(version, pattern) {
        Ok(version) => version,
        Err(err) => return user_error(err, printer),
    };

    let bumped = match value {
        Some(value) => {
            let value = match SegmentValue::parse(segment, value) {
                Ok(value) => value,
                Err(err) => return user_error(anyhow!(err), printer),
            };
            version.bump(segment, value)
        }
        None => version.increment(segment),
    };
    let bumped = match bumped {
        Ok(bumped) => bumped,
        Err(err) => return user_error(err, printer),
    };

    writeln!(printer.stdout(), "{bumped}")?;

    Ok(ExitStatus::Success)
}
