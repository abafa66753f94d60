use std::fmt::Write;
use std::path::Path;

use anyhow::Result;

use railyard_version::{VersionParseError, VersionParser, VersionSourceRegistry};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

/// The part of a derived version to print.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeriveOutput {
    #[default]
    Full,
    Public,
    Local,
}

/// Run a version source and print the version it produced.
pub(crate) fn derive(
    source: &str,
    directory: &Path,
    output: DeriveOutput,
    printer: Printer,
) -> Result<ExitStatus> {
    let mut sources = VersionSourceRegistry::new();
    railyard_git::register(&mut sources, directory);
    let parser = VersionParser::new(sources);

    let version = match parser.parse_from(source) {
        Ok(version) => version,
        Err(err @ VersionParseError::UnknownSource { .. }) => return user_error(err, printer),
        Err(err) => return Err(err.into()),
    };

    match output {
        DeriveOutput::Full => writeln!(printer.stdout(), "{version}")?,
        DeriveOutput::Public => writeln!(printer.stdout(), "{}", version.public())?,
        DeriveOutput::Local => writeln!(printer.stdout(), "{}", version.local())?,
    }

    Ok(ExitStatus::Success)
}
