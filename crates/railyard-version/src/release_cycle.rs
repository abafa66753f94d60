use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The stage of a release: alpha, beta, release candidate or production.
///
/// Release cycles are ordered by their rank, so `Alpha < Beta < ReleaseCandidate < Production`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseCycle {
    /// `a`, as in `1.0a1`
    Alpha,
    /// `b`, as in `1.0b1`
    Beta,
    /// `rc`, as in `1.0rc1`
    ReleaseCandidate,
    /// `.`, as in `1.0.1`
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReleaseCycleError {
    #[error("No release cycle with rank {0}, must be one of 0 (a), 1 (b), 2 (rc), 3 (.)")]
    UnknownRank(u64),
    #[error("No release cycle with alias '{0}', must be one of a, b, rc, .")]
    UnknownAlias(String),
}

impl ReleaseCycle {
    /// All release cycles, ordered by rank.
    pub const ALL: [Self; 4] = [
        Self::Alpha,
        Self::Beta,
        Self::ReleaseCandidate,
        Self::Production,
    ];

    /// Look up a release cycle by its integer rank.
    pub fn from_rank(rank: u64) -> Result<Self, ReleaseCycleError> {
        match rank {
            0 => Ok(Self::Alpha),
            1 => Ok(Self::Beta),
            2 => Ok(Self::ReleaseCandidate),
            3 => Ok(Self::Production),
            _ => Err(ReleaseCycleError::UnknownRank(rank)),
        }
    }

    /// Look up a release cycle by its string alias, as it appears in a version string.
    pub fn from_alias(alias: &str) -> Result<Self, ReleaseCycleError> {
        match alias {
            "a" => Ok(Self::Alpha),
            "b" => Ok(Self::Beta),
            "rc" => Ok(Self::ReleaseCandidate),
            "." => Ok(Self::Production),
            _ => Err(ReleaseCycleError::UnknownAlias(alias.to_string())),
        }
    }

    pub fn rank(self) -> u64 {
        match self {
            Self::Alpha => 0,
            Self::Beta => 1,
            Self::ReleaseCandidate => 2,
            Self::Production => 3,
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::ReleaseCandidate => "rc",
            Self::Production => ".",
        }
    }

    /// The following stage, or `None` for a production release.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Alpha => Some(Self::Beta),
            Self::Beta => Some(Self::ReleaseCandidate),
            Self::ReleaseCandidate => Some(Self::Production),
            Self::Production => None,
        }
    }
}

impl FromStr for ReleaseCycle {
    type Err = ReleaseCycleError;

    fn from_str(alias: &str) -> Result<Self, Self::Err> {
        Self::from_alias(alias)
    }
}

impl TryFrom<u64> for ReleaseCycle {
    type Error = ReleaseCycleError;

    fn try_from(rank: u64) -> Result<Self, Self::Error> {
        Self::from_rank(rank)
    }
}

impl Display for ReleaseCycle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alias())
    }
}

/// Any of the ways a release cycle can be specified: by rank, by alias, or directly.
///
/// Resolution is deferred so that builders can accept all three and report an unknown key as a
/// construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseCycleKey {
    Rank(u64),
    Alias(String),
    Cycle(ReleaseCycle),
}

impl ReleaseCycleKey {
    pub fn resolve(&self) -> Result<ReleaseCycle, ReleaseCycleError> {
        match self {
            Self::Rank(rank) => ReleaseCycle::from_rank(*rank),
            Self::Alias(alias) => ReleaseCycle::from_alias(alias),
            Self::Cycle(cycle) => Ok(*cycle),
        }
    }
}

impl From<ReleaseCycle> for ReleaseCycleKey {
    fn from(cycle: ReleaseCycle) -> Self {
        Self::Cycle(cycle)
    }
}

impl From<u64> for ReleaseCycleKey {
    fn from(rank: u64) -> Self {
        Self::Rank(rank)
    }
}

impl From<&str> for ReleaseCycleKey {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.to_string())
    }
}

impl From<String> for ReleaseCycleKey {
    fn from(alias: String) -> Self {
        Self::Alias(alias)
    }
}
