//! The `git` version source: derive a version from the latest tag of a repository, the commit
//! that is checked out, and whether the working tree is dirty.
//!
//! | Repository state                        | Version                    |
//! |-----------------------------------------|----------------------------|
//! | HEAD is tagged `1.2.3`, clean           | `1.2.3`                    |
//! | HEAD is a commit after `1.2.3`, clean   | `1.2.3+<full sha>`         |
//! | HEAD is a commit after `1.2.3`, dirty   | `1.2.3+<full sha>.dirty`   |
//! | HEAD is tagged `1.2.3+linux`, dirty     | `1.2.3+linux.dirty`        |
//! | No tags                                 | `0+<full sha>`             |
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use cargo_util::ProcessBuilder;
use tracing::{debug, instrument};

use railyard_version::{VersionSource, VersionSourceError, VersionSourceRegistry};

/// The name the Git version source is registered under.
pub const SOURCE_NAME: &str = "git";

/// The tag assumed for repositories without any tags.
const UNTAGGED: &str = "0";

/// The local label marking a working tree with uncommitted changes.
const DIRTY: &str = "dirty";

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("Git executable not found. Ensure that Git is installed and available.")]
    GitNotFound,
    #[error(transparent)]
    Other(#[from] which::Error),
    #[error("Cannot derive a version from the bare repository at `{}`", _0.display())]
    BareRepository(PathBuf),
}

/// A global cache of the result of `which git`.
pub static GIT: LazyLock<Result<PathBuf, GitError>> = LazyLock::new(|| {
    which::which("git").map_err(|err| match err {
        which::Error::CannotFindBinaryPath => GitError::GitNotFound,
        err => GitError::Other(err),
    })
});

/// Register the Git version source for the repository containing `path`.
pub fn register(registry: &mut VersionSourceRegistry, path: impl Into<PathBuf>) {
    registry.register(SOURCE_NAME, GitVersionSource::new(path));
}

/// Derives a version string from a Git repository, see the crate documentation.
#[derive(Debug, Clone)]
pub struct GitVersionSource {
    path: PathBuf,
}

impl GitVersionSource {
    /// A source for the repository at `path`, or one of its parent directories.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inspect the repository and compose the version string.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn describe(&self) -> Result<String> {
        let repository = GitRepository::open(&self.path)?;

        let head = repository
            .rev_parse("HEAD")
            .context("Failed to read the HEAD commit")?;
        let (tag, tag_commit) = match repository.latest_tag()? {
            Some(tag) => {
                let commit = repository
                    .tag_commit(&tag)
                    .with_context(|| format!("Failed to find the commit of tag `{tag}`"))?;
                (tag, Some(commit))
            }
            None => {
                debug!("No tags found, assuming `{UNTAGGED}`");
                (UNTAGGED.to_string(), None)
            }
        };
        let dirty = repository.is_dirty()?;
        debug!("HEAD is `{head}`, latest tag is `{tag}`, dirty: {dirty}");

        Ok(compose_version(&tag, &head, tag_commit.as_deref(), dirty))
    }
}

impl VersionSource for GitVersionSource {
    fn version_string(&self) -> Result<String, VersionSourceError> {
        Ok(self.describe()?)
    }
}

/// Build the version string from the repository state.
///
/// Every `+` in the tag starts a local label. Labels already present in the tag are kept,
/// followed by the HEAD commit (unless it is
/// the tagged commit) and the dirty marker.
pub fn compose_version(tag: &str, head: &str, tag_commit: Option<&str>, dirty: bool) -> String {
    let mut parts = tag.split('+');
    let public = parts.next().unwrap_or(tag);
    let mut labels = parts.filter(|label| !label.is_empty()).collect::<Vec<_>>();
    if tag_commit != Some(head) {
        labels.push(head);
    }
    if dirty {
        labels.push(DIRTY);
    }

    if labels.is_empty() {
        public.to_string()
    } else {
        format!("{public}+{}", labels.join("."))
    }
}

/// A local, non-bare Git repository.
struct GitRepository {
    path: PathBuf,
}

impl GitRepository {
    /// Opens the repository containing `path`.
    fn open(path: &Path) -> Result<Self> {
        let repository = Self {
            path: path.to_path_buf(),
        };
        let bare = repository
            .git(&["rev-parse", "--is-bare-repository"])
            .with_context(|| format!("`{}` is not a Git repository", path.display()))?;
        if bare == "true" {
            return Err(GitError::BareRepository(path.to_path_buf()).into());
        }
        Ok(repository)
    }

    /// Parses the object ID of the given `refname`.
    fn rev_parse(&self, refname: &str) -> Result<String> {
        self.git(&["rev-parse", refname])
    }

    /// The last tag by name, if any.
    fn latest_tag(&self) -> Result<Option<String>> {
        let tags = self
            .git(&["tag", "--list", "--sort=refname"])
            .context("Failed to list tags")?;
        Ok(tags.lines().next_back().map(ToString::to_string))
    }

    /// The commit a tag points to, peeling annotated tags.
    fn tag_commit(&self, tag: &str) -> Result<String> {
        self.git(&["rev-list", "-n", "1", tag])
    }

    /// Whether the working tree has unstaged changes or untracked files.
    ///
    /// Changes that are staged but not committed leave the working tree clean.
    fn is_dirty(&self) -> Result<bool> {
        let unstaged = self
            .git(&["diff", "--name-only"])
            .context("Failed to read the unstaged changes")?;
        if !unstaged.is_empty() {
            return Ok(true);
        }
        let untracked = self
            .git(&["ls-files", "--others", "--exclude-standard", "--", ":/"])
            .context("Failed to read the untracked files")?;
        Ok(!untracked.is_empty())
    }

    /// Run a Git command in the repository and return its trimmed standard output.
    fn git(&self, args: &[&str]) -> Result<String> {
        let output = ProcessBuilder::new(GIT.as_ref()?)
            .args(args)
            .cwd(&self.path)
            .exec_with_output()?;
        let mut output = String::from_utf8(output.stdout)?;
        output.truncate(output.trim_end().len());
        Ok(output)
    }
}
