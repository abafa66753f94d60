//! Version identifiers for build tooling.
//!
//! ```rust
//! use std::str::FromStr;
//! use railyard_version::{ReleaseCycle, Version};
//!
//! let version = Version::from_str("2!1.0a1").unwrap();
//! assert_eq!(version.epoch(), Some(2));
//! assert_eq!(version.release_cycle(), Some(ReleaseCycle::Alpha));
//! assert!(version < Version::from_str("2!1.0b1").unwrap());
//! ```
//!
//! A version is made of eight segments, always in this order:
//!
//! * an optional epoch, written as a `N!` prefix
//! * a major release, the only segment that is always present (`0` by default)
//! * an optional minor release, written as `.N`
//! * a release cycle and a patch release, which are either both present or both absent, written
//!   as `aN`, `bN`, `rcN` or `.N` (the last one being a production release)
//! * an optional post release, written as `.postN`
//! * an optional dev release, written as `.devN`
//! * an optional local identifier, written as `+label`
//!
//! Unlike PEP 440, ordering is purely positional: segments are compared one after another and an
//! absent segment sorts before any present value. This means `1.0 < 1.0a1 < 1.0.1` and
//! `1.0 < 1.0.dev0`.
//!
//! Strings are turned into versions with a [`VersionParser`], which also knows about named
//! [`VersionSource`]s that produce version strings on demand (e.g., from the state of a Git
//! repository).

pub use crate::parser::{
    VersionParseError, VersionParser, VersionSource, VersionSourceError, VersionSourceRegistry,
};
pub use crate::pattern::{
    PatternError, REQUIRED_FIELDS, VersionPattern, grammatical_series, validate,
};
pub use crate::release_cycle::{ReleaseCycle, ReleaseCycleError, ReleaseCycleKey};
pub use crate::segment::{NumericSegment, Segment, SegmentName, SegmentValue, StringSegment};
pub use crate::version::{Version, VersionBuildError, VersionBuilder};

mod parser;
mod pattern;
mod release_cycle;
mod segment;
mod version;
