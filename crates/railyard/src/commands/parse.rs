use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use railyard_version::{Version, VersionParser, VersionPattern};

use crate::commands::{ExitStatus, user_error};
use crate::printer::Printer;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Print the canonical version.
    #[default]
    Text,
    /// Print every segment as JSON.
    Json,
}

/// A version with every segment spelled out, absent segments being `null`.
#[derive(Debug, Serialize)]
struct VersionReport<'a> {
    version: &'a Version,
    public: String,
    local: String,
    epoch: Option<u64>,
    major_release: u64,
    minor_release: Option<u64>,
    release_cycle: Option<&'static str>,
    patch_release: Option<u64>,
    post_release: Option<u64>,
    dev_release: Option<u64>,
    local_identifier: Option<&'a str>,
}

impl<'a> From<&'a Version> for VersionReport<'a> {
    fn from(version: &'a Version) -> Self {
        Self {
            version,
            public: version.public(),
            local: version.local(),
            epoch: version.epoch(),
            major_release: version.major_release(),
            minor_release: version.minor_release(),
            release_cycle: version.release_cycle().map(|cycle| cycle.alias()),
            patch_release: version.patch_release(),
            post_release: version.post_release(),
            dev_release: version.dev_release(),
            local_identifier: version.local_identifier(),
        }
    }
}

/// Parse a version and print it in canonical form.
pub(crate) fn parse(
    version: &str,
    pattern: &VersionPattern,
    output_format: OutputFormat,
    printer: Printer,
) -> Result<ExitStatus> {
    let version = match VersionParser::default().parse_with(version, pattern) {
        Ok(version) => version,
        Err(err) => return user_error(err, printer),
    };

    match output_format {
        OutputFormat::Text => writeln!(printer.stdout(), "{version}")?,
        OutputFormat::Json => writeln!(
            printer.stdout(),
            "{}",
            serde_json::to_string_pretty(&VersionReport::from(&version))?
        )?,
    }

    Ok(ExitStatus::Success)
}
