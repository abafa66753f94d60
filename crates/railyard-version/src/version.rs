use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use tracing::debug;

use crate::parser::{self, VersionParseError};
use crate::pattern::VersionPattern;
use crate::release_cycle::{ReleaseCycle, ReleaseCycleError, ReleaseCycleKey};
use crate::segment::{
    NumericSegment, Segment, SegmentFormat, SegmentName, SegmentValue, StringSegment,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionBuildError {
    #[error("Major release cannot be undefined")]
    MissingMajorRelease,
    #[error("Release cycle `{0}` was given without a patch release, they must be defined together")]
    ReleaseCycleWithoutPatch(ReleaseCycle),
    #[error("Patch release `{0}` was given without a release cycle, they must be defined together")]
    PatchWithoutReleaseCycle(u64),
    #[error("Minor release cannot be undefined if patch release is defined")]
    PatchWithoutMinor,
    #[error(transparent)]
    UnknownReleaseCycle(#[from] ReleaseCycleError),
    #[error("Local identifier `{0}` may only contain ASCII letters, digits, and dots")]
    InvalidLocalIdentifier(String),
    #[error("Version segments cannot be decremented, {segment} is `{current}` and cannot be set to `{requested}`")]
    Decrement {
        segment: SegmentName,
        current: SegmentValue,
        requested: String,
    },
    #[error("Cannot set {segment} to `{value}`, expected {}", expected_kind(*segment))]
    KindMismatch {
        segment: SegmentName,
        value: SegmentValue,
    },
    #[error("The local identifier has no successor, set it to an explicit value instead")]
    LocalIdentifierIncrement,
    #[error("The release cycle is already `{0}`, the final stage")]
    FinalReleaseCycle(ReleaseCycle),
    #[error("Cannot increment {0} past the largest supported value")]
    Overflow(SegmentName),
}

fn expected_kind(segment: SegmentName) -> &'static str {
    match segment {
        SegmentName::ReleaseCycle => "a release cycle",
        SegmentName::LocalIdentifier => "a local identifier",
        _ => "a number",
    }
}

/// A version such as `1.2.3`, `2!1.0a1` or `1.0.post2.dev3+abc.123`.
///
/// Versions are immutable; [`Version::bump`] and [`Version::increment`] return new versions.
///
/// Equality and ordering take all eight segments into account, including the local identifier,
/// which is compared as a plain string. In particular `1.0+abc != 1.0` and `1.0 < 1.0+abc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    epoch: NumericSegment,
    major_release: NumericSegment,
    minor_release: NumericSegment,
    release_cycle: Option<ReleaseCycle>,
    patch_release: NumericSegment,
    post_release: NumericSegment,
    dev_release: NumericSegment,
    local_identifier: StringSegment,
}

impl Version {
    /// Start building a version from explicit segment values.
    pub fn builder() -> VersionBuilder {
        VersionBuilder::default()
    }

    /// A builder initialized with the segments of this version.
    pub fn to_builder(&self) -> VersionBuilder {
        VersionBuilder::from(self)
    }

    /// The [epoch](https://peps.python.org/pep-0440/#version-epochs), e.g., `2` in `2!1.0`.
    pub fn epoch(&self) -> Option<u64> {
        self.epoch.value()
    }

    /// The major release, which is always defined.
    pub fn major_release(&self) -> u64 {
        self.major_release.value().unwrap_or_default()
    }

    pub fn minor_release(&self) -> Option<u64> {
        self.minor_release.value()
    }

    /// The release cycle, defined if and only if the patch release is.
    pub fn release_cycle(&self) -> Option<ReleaseCycle> {
        self.release_cycle
    }

    pub fn patch_release(&self) -> Option<u64> {
        self.patch_release.value()
    }

    pub fn post_release(&self) -> Option<u64> {
        self.post_release.value()
    }

    pub fn dev_release(&self) -> Option<u64> {
        self.dev_release.value()
    }

    /// The local identifier without its `+`, e.g., `abc.123` in `1.0+abc.123`.
    pub fn local_identifier(&self) -> Option<&str> {
        self.local_identifier.value()
    }

    /// Whether this is an alpha, beta or release candidate.
    pub fn is_pre_release(&self) -> bool {
        self.release_cycle
            .is_some_and(|cycle| cycle != ReleaseCycle::Production)
    }

    pub fn is_post_release(&self) -> bool {
        self.post_release.is_present()
    }

    pub fn is_dev_release(&self) -> bool {
        self.dev_release.is_present()
    }

    /// Whether this version has a local identifier, e.g., `1.0+abc`.
    pub fn is_local(&self) -> bool {
        self.local_identifier.is_present()
    }

    /// A single segment.
    pub fn segment(&self, segment: SegmentName) -> Segment<'_> {
        match segment {
            SegmentName::Epoch => Segment::Numeric(&self.epoch),
            SegmentName::MajorRelease => Segment::Numeric(&self.major_release),
            SegmentName::MinorRelease => Segment::Numeric(&self.minor_release),
            SegmentName::ReleaseCycle => Segment::ReleaseCycle(self.release_cycle),
            SegmentName::PatchRelease => Segment::Numeric(&self.patch_release),
            SegmentName::PostRelease => Segment::Numeric(&self.post_release),
            SegmentName::DevRelease => Segment::Numeric(&self.dev_release),
            SegmentName::LocalIdentifier => Segment::String(&self.local_identifier),
        }
    }

    /// All eight segments, in rendering and comparison order.
    pub fn segments(&self) -> [(SegmentName, Segment<'_>); 8] {
        SegmentName::ALL.map(|name| (name, self.segment(name)))
    }

    /// The value of a segment, or `None` if it is absent.
    pub fn segment_value(&self, segment: SegmentName) -> Option<SegmentValue> {
        match self.segment(segment) {
            Segment::Numeric(numeric) => numeric.value().map(SegmentValue::Number),
            Segment::String(string) => string.value().map(SegmentValue::from),
            Segment::ReleaseCycle(cycle) => cycle.map(SegmentValue::ReleaseCycle),
        }
    }

    /// The public version, i.e., everything but the local identifier.
    pub fn public(&self) -> String {
        self.segments()
            .iter()
            .filter(|(name, _)| *name != SegmentName::LocalIdentifier)
            .map(|(_, segment)| segment.render())
            .collect()
    }

    /// The local identifier including its `+`, or an empty string.
    pub fn local(&self) -> String {
        self.local_identifier.render()
    }

    /// Set a segment to a new, higher value, resetting all lower segments to their defaults.
    ///
    /// ```text
    /// 1.2.3.post1 --(minor_release = 5)--> 1.5
    /// 1.2a3       --(release_cycle = rc)--> 1.2rc0
    /// 1.2         --(patch_release = 1)---> 1.2.1
    /// ```
    ///
    /// Setting a segment to its current value returns an identical version, setting it to a lower
    /// value is an error.
    pub fn bump(
        &self,
        segment: SegmentName,
        value: impl Into<SegmentValue>,
    ) -> Result<Self, VersionBuildError> {
        let value = value.into();
        let matches_kind = matches!(
            (segment, &value),
            (SegmentName::ReleaseCycle, SegmentValue::ReleaseCycle(_))
                | (SegmentName::LocalIdentifier, SegmentValue::Local(_))
                | (
                    SegmentName::Epoch
                        | SegmentName::MajorRelease
                        | SegmentName::MinorRelease
                        | SegmentName::PatchRelease
                        | SegmentName::PostRelease
                        | SegmentName::DevRelease,
                    SegmentValue::Number(_)
                )
        );
        if !matches_kind {
            return Err(VersionBuildError::KindMismatch { segment, value });
        }

        // An empty local identifier is an absent one.
        let requested = match &value {
            SegmentValue::Local(local) if local.is_empty() => None,
            value => Some(value.clone()),
        };
        if let Some(current) = self.segment_value(segment) {
            match requested.as_ref().map(|requested| Ord::cmp(requested, &current)) {
                None | Some(Ordering::Less) => {
                    return Err(VersionBuildError::Decrement {
                        segment,
                        current,
                        requested: value.to_string(),
                    });
                }
                Some(Ordering::Equal) => return Ok(self.clone()),
                Some(Ordering::Greater) => {}
            }
        } else if requested.is_none() {
            return Ok(self.clone());
        }

        debug!("Setting {segment} of `{self}` to `{value}`");
        let mut builder = self.to_builder();
        for lower in segment.lower() {
            builder.reset(*lower);
        }
        match value {
            SegmentValue::Number(number) => {
                builder.set_number(segment, number);
                if segment == SegmentName::PatchRelease {
                    if builder.release_cycle.is_none() {
                        builder.release_cycle = Some(ReleaseCycle::Production.into());
                    }
                    builder.minor_release = builder.minor_release.or(Some(0));
                }
            }
            SegmentValue::ReleaseCycle(cycle) => {
                builder.release_cycle = Some(cycle.into());
                builder.patch_release = Some(0);
                builder.minor_release = builder.minor_release.or(Some(0));
            }
            SegmentValue::Local(local) => {
                builder.local_identifier = Some(local);
            }
        }
        builder.build()
    }

    /// Bump a segment to its next value.
    ///
    /// An absent number becomes `0`, a present number `n` becomes `n + 1`, and the release cycle
    /// advances to the next stage (an absent release cycle becomes alpha).
    pub fn increment(&self, segment: SegmentName) -> Result<Self, VersionBuildError> {
        let value = match segment {
            SegmentName::LocalIdentifier => {
                return Err(VersionBuildError::LocalIdentifierIncrement);
            }
            SegmentName::ReleaseCycle => match self.release_cycle {
                None => SegmentValue::ReleaseCycle(ReleaseCycle::Alpha),
                Some(cycle) => SegmentValue::ReleaseCycle(
                    cycle
                        .next()
                        .ok_or(VersionBuildError::FinalReleaseCycle(cycle))?,
                ),
            },
            _ => {
                let next = match self.segment_value(segment) {
                    Some(SegmentValue::Number(number)) => number
                        .checked_add(1)
                        .ok_or(VersionBuildError::Overflow(segment))?,
                    _ => 0,
                };
                SegmentValue::Number(next)
            }
        };
        self.bump(segment, value)
    }
}

/// Renders the canonical form, e.g., `2!1.0a1.post2+abc`.
impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (_, segment) in self.segments() {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Segment by segment, absent before present:
    ///
    /// 1.0 < 1.0a1 < 1.0b1 < 1.0rc1 < 1.0.1 < 1.0.1.post1 < 1.0.1.post1.dev1 < 1.0.1.post1.dev1+abc
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.major_release.cmp(&other.major_release))
            .then_with(|| self.minor_release.cmp(&other.minor_release))
            .then_with(|| self.release_cycle.cmp(&other.release_cycle))
            .then_with(|| self.patch_release.cmp(&other.patch_release))
            .then_with(|| self.post_release.cmp(&other.post_release))
            .then_with(|| self.dev_release.cmp(&other.dev_release))
            .then_with(|| self.local_identifier.cmp(&other.local_identifier))
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Parses a version such as `1.2.3`, `v2!1.0a1` or `1.0.post2+abc.123` with the default
    /// pattern.
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        parser::parse_with(version, &VersionPattern::default())
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Collects segment values and checks the structural invariants of a [`Version`] on
/// [`VersionBuilder::build`].
///
/// Segments that are never set keep their defaults: `0` for the major release, absent for
/// everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBuilder {
    epoch: Option<u64>,
    major_release: Option<u64>,
    minor_release: Option<u64>,
    release_cycle: Option<ReleaseCycleKey>,
    patch_release: Option<u64>,
    post_release: Option<u64>,
    dev_release: Option<u64>,
    local_identifier: Option<String>,
}

impl Default for VersionBuilder {
    fn default() -> Self {
        Self {
            epoch: None,
            major_release: Some(0),
            minor_release: None,
            release_cycle: None,
            patch_release: None,
            post_release: None,
            dev_release: None,
            local_identifier: None,
        }
    }
}

impl From<&Version> for VersionBuilder {
    fn from(version: &Version) -> Self {
        Self {
            epoch: version.epoch(),
            major_release: Some(version.major_release()),
            minor_release: version.minor_release(),
            release_cycle: version.release_cycle().map(ReleaseCycleKey::from),
            patch_release: version.patch_release(),
            post_release: version.post_release(),
            dev_release: version.dev_release(),
            local_identifier: version.local_identifier().map(ToString::to_string),
        }
    }
}

impl VersionBuilder {
    #[must_use]
    pub fn epoch(mut self, epoch: impl Into<Option<u64>>) -> Self {
        self.epoch = epoch.into();
        self
    }

    /// Passing `None` leaves the major release undefined, which fails the build.
    #[must_use]
    pub fn major_release(mut self, major_release: impl Into<Option<u64>>) -> Self {
        self.major_release = major_release.into();
        self
    }

    #[must_use]
    pub fn minor_release(mut self, minor_release: impl Into<Option<u64>>) -> Self {
        self.minor_release = minor_release.into();
        self
    }

    /// The release cycle, by rank (`2`), alias (`"rc"`) or value.
    #[must_use]
    pub fn release_cycle(mut self, release_cycle: impl Into<ReleaseCycleKey>) -> Self {
        self.release_cycle = Some(release_cycle.into());
        self
    }

    #[must_use]
    pub fn patch_release(mut self, patch_release: impl Into<Option<u64>>) -> Self {
        self.patch_release = patch_release.into();
        self
    }

    #[must_use]
    pub fn post_release(mut self, post_release: impl Into<Option<u64>>) -> Self {
        self.post_release = post_release.into();
        self
    }

    #[must_use]
    pub fn dev_release(mut self, dev_release: impl Into<Option<u64>>) -> Self {
        self.dev_release = dev_release.into();
        self
    }

    #[must_use]
    pub fn local_identifier(mut self, local_identifier: impl Into<String>) -> Self {
        self.local_identifier = Some(local_identifier.into());
        self
    }

    /// Set a numeric segment by name. Ignored for the release cycle and the local identifier.
    pub(crate) fn set_number(&mut self, segment: SegmentName, number: u64) {
        let field = match segment {
            SegmentName::Epoch => &mut self.epoch,
            SegmentName::MajorRelease => &mut self.major_release,
            SegmentName::MinorRelease => &mut self.minor_release,
            SegmentName::PatchRelease => &mut self.patch_release,
            SegmentName::PostRelease => &mut self.post_release,
            SegmentName::DevRelease => &mut self.dev_release,
            SegmentName::ReleaseCycle | SegmentName::LocalIdentifier => return,
        };
        *field = Some(number);
    }

    /// Reset a segment to its default.
    fn reset(&mut self, segment: SegmentName) {
        let default = Self::default();
        match segment {
            SegmentName::Epoch => self.epoch = default.epoch,
            SegmentName::MajorRelease => self.major_release = default.major_release,
            SegmentName::MinorRelease => self.minor_release = default.minor_release,
            SegmentName::ReleaseCycle => self.release_cycle = default.release_cycle,
            SegmentName::PatchRelease => self.patch_release = default.patch_release,
            SegmentName::PostRelease => self.post_release = default.post_release,
            SegmentName::DevRelease => self.dev_release = default.dev_release,
            SegmentName::LocalIdentifier => self.local_identifier = default.local_identifier,
        }
    }

    /// Check the structural invariants and build the [`Version`].
    pub fn build(self) -> Result<Version, VersionBuildError> {
        let major_release = self
            .major_release
            .ok_or(VersionBuildError::MissingMajorRelease)?;
        let release_cycle = self
            .release_cycle
            .as_ref()
            .map(ReleaseCycleKey::resolve)
            .transpose()?;

        match (release_cycle, self.patch_release) {
            (Some(cycle), None) => {
                return Err(VersionBuildError::ReleaseCycleWithoutPatch(cycle));
            }
            (None, Some(patch)) => {
                return Err(VersionBuildError::PatchWithoutReleaseCycle(patch));
            }
            _ => {}
        }
        if self.patch_release.is_some() && self.minor_release.is_none() {
            return Err(VersionBuildError::PatchWithoutMinor);
        }

        // Any other character would make the rendered version unparsable.
        let local_identifier = self.local_identifier.filter(|local| !local.is_empty());
        if let Some(local) = &local_identifier {
            if !local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.')
            {
                return Err(VersionBuildError::InvalidLocalIdentifier(local.clone()));
            }
        }

        Ok(Version {
            epoch: NumericSegment::new(self.epoch, SegmentFormat::EPOCH),
            major_release: NumericSegment::new(Some(major_release), SegmentFormat::MAJOR),
            minor_release: NumericSegment::new(self.minor_release, SegmentFormat::MINOR),
            release_cycle,
            patch_release: NumericSegment::new(self.patch_release, SegmentFormat::PATCH),
            post_release: NumericSegment::new(self.post_release, SegmentFormat::POST),
            dev_release: NumericSegment::new(self.dev_release, SegmentFormat::DEV),
            local_identifier: StringSegment::new(local_identifier, SegmentFormat::LOCAL),
        })
    }
}
