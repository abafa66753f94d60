use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use railyard_version::SegmentName;

use crate::commands::{DeriveOutput, ExitStatus, OutputFormat, user_error};
use crate::env_vars::EnvVars;
use crate::printer::{Printer, Stderr, write_error_chain};
use crate::settings::{FilesystemOptions, Settings};

mod commands;
mod env_vars;
mod logging;
mod printer;
mod settings;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Do not print any output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Use verbose output.
    ///
    /// Repeat (`-vv`) to add timestamps and targets to each message, or (`-vvv`) to show the
    /// hierarchy of spans with timings.
    #[arg(global = true, long, short, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// The path to a `railyard.toml` file to use for configuration.
    ///
    /// By default, the nearest `railyard.toml` in the current directory or its parents is used.
    #[arg(global = true, long, env = EnvVars::RAILYARD_CONFIG_FILE)]
    config_file: Option<PathBuf>,

    /// Avoid discovering a `railyard.toml` file.
    #[arg(
        global = true,
        long,
        env = EnvVars::RAILYARD_NO_CONFIG,
        value_parser = clap::builder::BoolishValueParser::new(),
        conflicts_with = "config_file"
    )]
    no_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a version and print it in canonical form.
    Parse(ParseArgs),
    /// Compare two versions, printing `<`, `==` or `>`.
    Compare(CompareArgs),
    /// Sort versions in ascending order.
    Sort(SortArgs),
    /// Set a segment of a version to a higher value, resetting all lower segments.
    Bump(BumpArgs),
    /// Check that a custom version pattern defines all required capture groups.
    ValidatePattern(ValidatePatternArgs),
    /// Derive a version from a version source, such as the state of a Git repository.
    Derive(DeriveArgs),
}

#[derive(Args)]
struct PatternArgs {
    /// A custom version pattern, a regular expression with one named capture group per segment.
    ///
    /// The groups are `epoch`, `major_release`, `minor_release`, `release_cycle`,
    /// `patch_release`, `post_release`, `dev_release`, and `local_identifier`. The pattern must
    /// match the entire version.
    #[arg(long, env = EnvVars::RAILYARD_VERSION_PATTERN)]
    pattern: Option<String>,
}

#[derive(Args)]
struct ParseArgs {
    /// The version to parse (e.g., `1.2.3`, `2!1.0a1`, or `1.0.post2+abc.123`).
    version: String,

    #[command(flatten)]
    pattern: PatternArgs,

    /// The format in which to print the version.
    #[arg(long, value_enum, default_value_t)]
    output_format: OutputFormat,
}

#[derive(Args)]
struct CompareArgs {
    /// The left-hand side of the comparison.
    left: String,

    /// The right-hand side of the comparison.
    right: String,

    #[command(flatten)]
    pattern: PatternArgs,
}

#[derive(Args)]
struct SortArgs {
    /// The versions to sort.
    #[arg(required = true)]
    versions: Vec<String>,

    /// Sort in descending order.
    #[arg(long)]
    reverse: bool,

    #[command(flatten)]
    pattern: PatternArgs,
}

#[derive(Args)]
struct BumpArgs {
    /// The version to bump.
    version: String,

    /// The segment to bump: `epoch`, `major`, `minor`, `cycle`, `patch`, `post`, `dev`, or
    /// `local`.
    segment: SegmentName,

    /// The new value of the segment, which must not be lower than the current one.
    ///
    /// Numbers for numeric segments, `a`, `b`, `rc` or `.` (or their ranks `0` to `3`) for the
    /// release cycle, and a label for the local identifier. Defaults to the next value.
    #[arg(long)]
    value: Option<String>,

    #[command(flatten)]
    pattern: PatternArgs,
}

#[derive(Args)]
struct ValidatePatternArgs {
    /// The version pattern to validate.
    pattern: String,
}

#[derive(Args)]
struct DeriveArgs {
    /// The version source to run.
    ///
    /// Defaults to the `source` of the `railyard.toml` file, or `git`.
    #[arg(long)]
    source: Option<String>,

    /// The directory to derive the version for.
    #[arg(long, default_value = ".")]
    directory: PathBuf,

    /// Only print the public version, without the local identifier.
    #[arg(long, conflicts_with = "local")]
    public: bool,

    /// Only print the local identifier, including its `+`.
    #[arg(long, conflicts_with = "public")]
    local: bool,
}

fn inner() -> Result<ExitStatus> {
    let cli = Cli::parse();

    logging::setup_logging(logging::Level::from_verbosity(cli.verbose))?;

    let printer = Printer::new(cli.quiet, cli.verbose);

    let filesystem = if cli.no_config {
        None
    } else if let Some(config_file) = &cli.config_file {
        Some(FilesystemOptions::from_file(config_file)?)
    } else {
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;
        FilesystemOptions::find(&cwd)?
    };
    let settings = Settings::from_filesystem(filesystem)?;
    debug!("Resolved settings: {settings:?}");

    // Invalid patterns are reported as user errors.
    let pattern = |args: &PatternArgs| settings.pattern(args.pattern.as_deref());

    match cli.command {
        Commands::Parse(args) => match pattern(&args.pattern) {
            Ok(pattern) => commands::parse(&args.version, &pattern, args.output_format, printer),
            Err(err) => user_error(err, printer),
        },
        Commands::Compare(args) => match pattern(&args.pattern) {
            Ok(pattern) => commands::compare(&args.left, &args.right, &pattern, printer),
            Err(err) => user_error(err, printer),
        },
        Commands::Sort(args) => match pattern(&args.pattern) {
            Ok(pattern) => commands::sort(&args.versions, args.reverse, &pattern, printer),
            Err(err) => user_error(err, printer),
        },
        Commands::Bump(args) => match pattern(&args.pattern) {
            Ok(pattern) => commands::bump(
                &args.version,
                args.segment,
                args.value.as_deref(),
                &pattern,
                printer,
            ),
            Err(err) => user_error(err, printer),
        },
        Commands::ValidatePattern(args) => commands::validate_pattern(&args.pattern, printer),
        Commands::Derive(args) => {
            let output = if args.public {
                DeriveOutput::Public
            } else if args.local {
                DeriveOutput::Local
            } else {
                DeriveOutput::Full
            };
            commands::derive(
                &settings.source(args.source),
                &args.directory,
                output,
                printer,
            )
        }
    }
}

fn main() -> ExitCode {
    match inner() {
        Ok(code) => code.into(),
        Err(err) => {
            // Unexpected errors are shown even with `--quiet`.
            let _ = write_error_chain(&mut Stderr::Enabled, &err);
            ExitStatus::Error.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
