use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::release_cycle::ReleaseCycle;

/// The name of one of the eight segments of a [`Version`](crate::Version).
///
/// The declaration order is the rendering order and the comparison precedence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentName {
    /// `2` in `2!1.0`
    Epoch,
    /// `1` in `1.2.3`
    MajorRelease,
    /// `2` in `1.2.3`
    MinorRelease,
    /// `a` in `1.0a1`, or the second `.` in `1.2.3`
    ReleaseCycle,
    /// `1` in `1.0a1`, or `3` in `1.2.3`
    PatchRelease,
    /// `2` in `1.0.post2`
    PostRelease,
    /// `3` in `1.0.dev3`
    DevRelease,
    /// `abc.123` in `1.0+abc.123`
    LocalIdentifier,
}

impl SegmentName {
    /// All segment names, in precedence order.
    pub const ALL: [Self; 8] = [
        Self::Epoch,
        Self::MajorRelease,
        Self::MinorRelease,
        Self::ReleaseCycle,
        Self::PatchRelease,
        Self::PostRelease,
        Self::DevRelease,
        Self::LocalIdentifier,
    ];

    /// The name of the capture group a version pattern must define for this segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Epoch => "epoch",
            Self::MajorRelease => "major_release",
            Self::MinorRelease => "minor_release",
            Self::ReleaseCycle => "release_cycle",
            Self::PatchRelease => "patch_release",
            Self::PostRelease => "post_release",
            Self::DevRelease => "dev_release",
            Self::LocalIdentifier => "local_identifier",
        }
    }

    /// The segments with a lower precedence than this one.
    pub fn lower(self) -> &'static [Self] {
        &Self::ALL[self as usize + 1..]
    }
}

impl Display for SegmentName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SegmentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for SegmentName {
    type Err = String;

    /// Accepts the capture group names as well as their short forms (`major`, `cycle`, ...).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = match name {
            "epoch" => Self::Epoch,
            "major_release" | "major" => Self::MajorRelease,
            "minor_release" | "minor" => Self::MinorRelease,
            "release_cycle" | "cycle" => Self::ReleaseCycle,
            "patch_release" | "patch" => Self::PatchRelease,
            "post_release" | "post" => Self::PostRelease,
            "dev_release" | "dev" => Self::DevRelease,
            "local_identifier" | "local" => Self::LocalIdentifier,
            other => {
                return Err(format!(
                    "No such version segment '{other}', must be one of epoch, major, minor, cycle, patch, post, dev, local"
                ));
            }
        };
        Ok(name)
    }
}

/// A template such as `".post{}"`, rendered by replacing the `{}` placeholder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SegmentFormat(&'static str);

impl SegmentFormat {
    pub(crate) const EPOCH: Self = Self("{}!");
    pub(crate) const MAJOR: Self = Self("{}");
    pub(crate) const MINOR: Self = Self(".{}");
    pub(crate) const PATCH: Self = Self("{}");
    pub(crate) const POST: Self = Self(".post{}");
    pub(crate) const DEV: Self = Self(".dev{}");
    pub(crate) const LOCAL: Self = Self("+{}");

    fn apply(self, value: impl Display) -> String {
        self.0.replacen("{}", &value.to_string(), 1)
    }
}

/// A numeric segment, which is either absent or holds a non-negative integer.
///
/// Absent segments render as an empty string and sort before any present value.
#[derive(Debug, Copy, Clone)]
pub struct NumericSegment {
    value: Option<u64>,
    format: SegmentFormat,
}

impl NumericSegment {
    pub(crate) fn new(value: Option<u64>, format: SegmentFormat) -> Self {
        Self { value, format }
    }

    /// The value of the segment, if present.
    pub fn value(&self) -> Option<u64> {
        self.value
    }

    /// Whether the segment holds a value.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Render the segment using its format, e.g., `.post2`.
    pub fn render(&self) -> String {
        self.value
            .map(|value| self.format.apply(value))
            .unwrap_or_default()
    }
}

// The format is derived from the segment's position, so only the value takes part.
impl PartialEq for NumericSegment {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for NumericSegment {}

impl std::hash::Hash for NumericSegment {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for NumericSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None` sorts before `Some(_)`, which is exactly "absent sorts first".
        self.value.cmp(&other.value)
    }
}

/// A string segment, which is absent when empty.
#[derive(Debug, Clone)]
pub struct StringSegment {
    value: String,
    format: SegmentFormat,
}

impl StringSegment {
    pub(crate) fn new(value: Option<String>, format: SegmentFormat) -> Self {
        Self {
            value: value.unwrap_or_default(),
            format,
        }
    }

    /// The value of the segment, if present.
    pub fn value(&self) -> Option<&str> {
        if self.value.is_empty() {
            None
        } else {
            Some(&self.value)
        }
    }

    /// Whether the segment holds a value.
    pub fn is_present(&self) -> bool {
        !self.value.is_empty()
    }

    /// Render the segment using its format, e.g., `+abc.123`.
    pub fn render(&self) -> String {
        if self.value.is_empty() {
            String::new()
        } else {
            self.format.apply(&self.value)
        }
    }
}

impl PartialEq for StringSegment {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for StringSegment {}

impl std::hash::Hash for StringSegment {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for StringSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StringSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

/// A borrowed view of one segment of a [`Version`](crate::Version).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// The epoch and the major, minor, patch, post and dev releases.
    Numeric(&'a NumericSegment),
    /// The local identifier.
    String(&'a StringSegment),
    /// The release cycle, absent when the version has no patch release.
    ReleaseCycle(Option<ReleaseCycle>),
}

impl Segment<'_> {
    /// Whether the segment holds a value.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Numeric(segment) => segment.is_present(),
            Self::String(segment) => segment.is_present(),
            Self::ReleaseCycle(cycle) => cycle.is_some(),
        }
    }

    /// Render the segment, or an empty string if it is absent.
    pub fn render(&self) -> String {
        match self {
            Self::Numeric(segment) => segment.render(),
            Self::String(segment) => segment.render(),
            Self::ReleaseCycle(cycle) => cycle
                .map(|cycle| cycle.alias().to_string())
                .unwrap_or_default(),
        }
    }
}

impl Display for Segment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A value to set a segment to, see [`Version::bump`](crate::Version::bump).
///
/// Values of the same kind are ordered the way the segment is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SegmentValue {
    /// A value for a numeric segment.
    Number(u64),
    /// A value for the release cycle.
    ReleaseCycle(ReleaseCycle),
    /// A value for the local identifier.
    Local(String),
}

impl SegmentValue {
    /// Interpret a raw string as a value for the given segment.
    ///
    /// Release cycles are given by alias or rank, numeric segments as integers, and the local
    /// identifier verbatim.
    pub fn parse(segment: SegmentName, value: &str) -> Result<Self, String> {
        match segment {
            SegmentName::ReleaseCycle => ReleaseCycle::from_alias(value)
                .or_else(|err| {
                    value
                        .parse::<u64>()
                        .map_err(|_| err)
                        .and_then(ReleaseCycle::from_rank)
                })
                .map(Self::ReleaseCycle)
                .map_err(|err| err.to_string()),
            SegmentName::LocalIdentifier => Ok(Self::Local(value.to_string())),
            _ => value
                .parse::<u64>()
                .map(Self::Number)
                .map_err(|err| format!("Couldn't parse '{value}' as a value for {segment}: {err}")),
        }
    }
}

impl From<u64> for SegmentValue {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<ReleaseCycle> for SegmentValue {
    fn from(cycle: ReleaseCycle) -> Self {
        Self::ReleaseCycle(cycle)
    }
}

impl From<&str> for SegmentValue {
    fn from(local: &str) -> Self {
        Self::Local(local.to_string())
    }
}

impl From<String> for SegmentValue {
    fn from(local: String) -> Self {
        Self::Local(local)
    }
}

impl Display for SegmentValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::ReleaseCycle(cycle) => write!(f, "{cycle}"),
            Self::Local(local) => write!(f, "{local}"),
        }
    }
}
