use std::process::ExitCode;

use anyhow::Result;

pub(crate) use bump::bump;
pub(crate) use compare::compare;
pub(crate) use derive::{DeriveOutput, derive};
pub(crate) use parse::{OutputFormat, parse};
pub(crate) use sort::sort;
pub(crate) use validate_pattern::validate_pattern;

use crate::printer::{Printer, write_error_chain};

mod bump;
mod compare;
mod derive;
mod parse;
mod sort;
mod validate_pattern;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed due to an error in the user input.
    Failure,

    /// The command failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}

/// Report an error in the user's input, such as a version that doesn't match the pattern.
pub(crate) fn user_error(err: impl Into<anyhow::Error>, printer: Printer) -> Result<ExitStatus> {
    write_error_chain(&mut printer.stderr(), &err.into())?;
    Ok(ExitStatus::Failure)
}
