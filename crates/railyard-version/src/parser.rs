use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::num::ParseIntError;

use regex::Regex;
use tracing::{debug, instrument};

use crate::pattern::{PatternError, VersionPattern, grammatical_series};
use crate::segment::SegmentName;
use crate::version::{Version, VersionBuildError};

/// The error a [`VersionSource`] may fail with. Its meaning is up to the source.
pub type VersionSourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum VersionParseError {
    #[error("Version `{version}` doesn't match the version pattern `{pattern}`")]
    NonConformingVersionString { version: String, pattern: String },
    #[error(transparent)]
    NonConformingVersionPattern(#[from] PatternError),
    #[error("Couldn't parse `{value}` as the {segment} of `{version}`")]
    InvalidNumber {
        version: String,
        segment: SegmentName,
        value: String,
        #[source]
        err: ParseIntError,
    },
    #[error("Version `{version}` is not a valid version")]
    InvalidVersion {
        version: String,
        #[source]
        err: VersionBuildError,
    },
    #[error("No version source named `{name}`{}", available_sources(available))]
    UnknownSource {
        name: String,
        available: Vec<String>,
    },
    #[error("Version source `{name}` failed")]
    SourceFailed {
        name: String,
        #[source]
        err: VersionSourceError,
    },
    #[error("Version source `{name}` produced an invalid version")]
    InvalidSourceVersion {
        name: String,
        #[source]
        err: Box<VersionParseError>,
    },
}

fn available_sources(available: &[String]) -> String {
    if available.is_empty() {
        ", no version sources are registered".to_string()
    } else {
        format!(", available sources are {}", grammatical_series(available))
    }
}

/// Produces a raw version string on demand, e.g., from the state of a Git repository.
///
/// Closures returning `Result<String, E>` are version sources.
pub trait VersionSource: Send + Sync {
    fn version_string(&self) -> Result<String, VersionSourceError>;
}

impl<F, E> VersionSource for F
where
    F: Fn() -> Result<String, E> + Send + Sync,
    E: Into<VersionSourceError>,
{
    fn version_string(&self) -> Result<String, VersionSourceError> {
        self().map_err(Into::into)
    }
}

/// Named [`VersionSource`]s.
///
/// Usually filled once during start-up and then handed to a [`VersionParser`].
#[derive(Default)]
pub struct VersionSourceRegistry {
    sources: BTreeMap<String, Box<dyn VersionSource>>,
}

impl VersionSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source under the given name.
    ///
    /// A source previously registered under the same name is replaced and returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl VersionSource + 'static,
    ) -> Option<Box<dyn VersionSource>> {
        let name = name.into();
        let previous = self.sources.insert(name.clone(), Box::new(source));
        if previous.is_some() {
            debug!("Replaced version source `{name}`");
        } else {
            debug!("Registered version source `{name}`");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&dyn VersionSource> {
        self.sources.get(name).map(|source| source.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// The names of all registered sources, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Debug for VersionSourceRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Turns strings into [`Version`]s, either directly or by running a named [`VersionSource`].
#[derive(Debug, Default)]
pub struct VersionParser {
    sources: VersionSourceRegistry,
}

impl VersionParser {
    pub fn new(sources: VersionSourceRegistry) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &VersionSourceRegistry {
        &self.sources
    }

    /// Parse a version with the default pattern.
    pub fn parse(&self, version: &str) -> Result<Version, VersionParseError> {
        parse_with(version, &VersionPattern::default())
    }

    /// Parse a version with a custom pattern.
    pub fn parse_with(
        &self,
        version: &str,
        pattern: &VersionPattern,
    ) -> Result<Version, VersionParseError> {
        parse_with(version, pattern)
    }

    /// Parse a version with a regular expression, which must define all required capture groups.
    pub fn parse_with_regex(
        &self,
        version: &str,
        regex: &Regex,
    ) -> Result<Version, VersionParseError> {
        let pattern = VersionPattern::from_regex(regex)?;
        parse_with(version, &pattern)
    }

    /// Run the version source registered under `name` and parse its output with the default
    /// pattern.
    #[instrument(skip(self))]
    pub fn parse_from(&self, name: &str) -> Result<Version, VersionParseError> {
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| VersionParseError::UnknownSource {
                name: name.to_string(),
                available: self.sources.names().map(ToString::to_string).collect(),
            })?;
        let version = source
            .version_string()
            .map_err(|err| VersionParseError::SourceFailed {
                name: name.to_string(),
                err,
            })?;
        debug!("Version source `{name}` produced `{version}`");
        self.parse(&version)
            .map_err(|err| VersionParseError::InvalidSourceVersion {
                name: name.to_string(),
                err: Box::new(err),
            })
    }
}

/// Match the entire input against the pattern and build a version from the matched groups.
///
/// Groups that did not match are left to the builder's defaults.
pub(crate) fn parse_with(
    version: &str,
    pattern: &VersionPattern,
) -> Result<Version, VersionParseError> {
    let fields = pattern.captures(version).ok_or_else(|| {
        VersionParseError::NonConformingVersionString {
            version: version.to_string(),
            pattern: pattern.to_string(),
        }
    })?;

    let mut builder = Version::builder();
    for (segment, value) in fields {
        match segment {
            SegmentName::ReleaseCycle => {
                builder = builder.release_cycle(value);
            }
            SegmentName::LocalIdentifier => {
                builder = builder.local_identifier(value);
            }
            _ => {
                let number =
                    value
                        .parse::<u64>()
                        .map_err(|err| VersionParseError::InvalidNumber {
                            version: version.to_string(),
                            segment,
                            value: value.to_string(),
                            err,
                        })?;
                builder.set_number(segment, number);
            }
        }
    }

    builder
        .build()
        .map_err(|err| VersionParseError::InvalidVersion {
            version: version.to_string(),
            err,
        })
}
