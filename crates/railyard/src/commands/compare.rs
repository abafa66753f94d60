use std::cmp::Ordering;
use std::fmt::Write;

use anyhow::Result;
use tracing::debug;

use railyard_version::{VersionParser, VersionPattern};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// Compare two versions, printing `<`, `==` or `>`.
pub(crate) fn compare(
    left: &str,
    right: &str,
    pattern: &VersionPattern,
    printer: Printer,
) -> Result<ExitStatus> {
    let parser = VersionParser::default();
    let (left, right) = match (
        parser.parse_with(left, pattern),
        parser.parse_with(right, pattern),
    ) {
        (Ok(left), Ok(right)) => (left, right),
        (Err(err), _) | (_, Err(err)) => return user_error(err, printer),
    };

    let ordering = left.cmp(&right);
    debug!("Compared `{left}` to `{right}`: {ordering:?}");
    let symbol = match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "==",
        Ordering::Greater => ">",
    };
    writeln!(printer.stdout(), "{symbol}")?;

    Ok(ExitStatus::Success)
}
