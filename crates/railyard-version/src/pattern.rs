use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::segment::SegmentName;

/// The capture groups every version pattern must define, one per segment.
pub const REQUIRED_FIELDS: [SegmentName; 8] = SegmentName::ALL;

/// The default grammar. Like every pattern, it is matched against the entire input.
const DEFAULT_VERSION_PATTERN: &str = concat!(
    r"v?",
    r"(?:(?P<epoch>[0-9]+)!)?",
    r"(?P<major_release>[0-9]+)",
    r"(?:\.(?P<minor_release>[0-9]+))?",
    r"(?:(?P<release_cycle>\.|a|b|rc)(?P<patch_release>[0-9]+))?",
    r"(?:\.post(?P<post_release>[0-9]+))?",
    r"(?:\.dev(?P<dev_release>[0-9]+))?",
    r"(?:\+(?P<local_identifier>[a-zA-Z0-9.]+))?",
);

static DEFAULT: LazyLock<VersionPattern> = LazyLock::new(|| {
    VersionPattern::new(DEFAULT_VERSION_PATTERN).expect("the default version pattern is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("Version pattern must define all required capture groups, missing {}", grammatical_series(missing))]
    NonConforming { missing: Vec<SegmentName> },
    #[error("Invalid version pattern `{pattern}`")]
    Regex {
        pattern: String,
        #[source]
        err: regex::Error,
    },
}

/// A grammar for version strings: a regular expression with one named capture group per
/// segment.
///
/// Patterns always match the entire input.
#[derive(Debug, Clone)]
pub struct VersionPattern {
    /// The pattern as written by the user.
    source: String,
    /// The compiled pattern. Anchored, unless it was handed over by [`VersionPattern::from_regex`].
    regex: Regex,
}

impl VersionPattern {
    /// Compile and validate a custom pattern.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let invalid = |err: regex::Error| PatternError::Regex {
            pattern: source.to_string(),
            err,
        };
        // Unbalanced groups such as `a)|(b` would otherwise escape the anchors.
        Regex::new(source).map_err(invalid)?;
        let regex = Regex::new(&Self::anchored(source)).map_err(invalid)?;
        validate(&regex)?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Validate an already compiled regular expression.
    ///
    /// The regex is used as built, including flags such as case insensitivity. A match still
    /// has to span the entire input.
    pub fn from_regex(regex: &Regex) -> Result<Self, PatternError> {
        validate(regex)?;
        Ok(Self {
            source: regex.as_str().to_string(),
            regex: regex.clone(),
        })
    }

    /// Wrap a pattern so that it only matches the entire input.
    fn anchored(source: &str) -> String {
        format!("^(?:{source})$")
    }

    /// The pattern as written, without the anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether this is the default grammar.
    pub fn is_default(&self) -> bool {
        self.source == DEFAULT_VERSION_PATTERN
    }

    /// Match the entire input, returning the non-empty captures of the required groups in
    /// segment order.
    pub(crate) fn captures<'a>(&self, input: &'a str) -> Option<Vec<(SegmentName, &'a str)>> {
        let captures = self.regex.captures(input)?;
        let matched = captures.get(0)?;
        if matched.start() != 0 || matched.end() != input.len() {
            trace!("`{input}` only matches in part, at {:?}", matched.range());
            return None;
        }
        let fields = REQUIRED_FIELDS
            .iter()
            .filter_map(|segment| {
                captures
                    .name(segment.as_str())
                    .map(|field| field.as_str())
                    .filter(|field| !field.is_empty())
                    .map(|field| (*segment, field))
            })
            .collect::<Vec<_>>();
        trace!("Matched `{input}` as {fields:?}");
        Some(fields)
    }
}

impl Default for VersionPattern {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

impl Display for VersionPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Check that a regular expression defines every required capture group.
///
/// All missing groups are reported at once, in segment order.
pub fn validate(regex: &Regex) -> Result<(), PatternError> {
    let names = regex.capture_names().flatten().collect::<Vec<_>>();
    let missing = REQUIRED_FIELDS
        .into_iter()
        .filter(|segment| !names.contains(&segment.as_str()))
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PatternError::NonConforming { missing })
    }
}

/// Join words into a human-readable series: `a`, `a and b`, `a, b, and c`.
///
/// If any word contains a comma, `; ` separates the words of a longer series instead.
pub fn grammatical_series<S: AsRef<str>>(words: &[S]) -> String {
    match words {
        [] => String::new(),
        [word] => word.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let separator = if words.iter().any(|word| word.as_ref().contains(',')) {
                "; "
            } else {
                ", "
            };
            let mut series = init
                .iter()
                .map(|word| word.as_ref().to_string())
                .collect::<Vec<_>>();
            series.push(format!("and {}", last.as_ref()));
            series.join(separator)
        }
    }
}
