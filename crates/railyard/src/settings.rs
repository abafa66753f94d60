use std::ops::Deref;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use railyard_version::{PatternError, VersionPattern};

/// The name of the configuration file.
pub(crate) const CONFIG_FILE: &str = "railyard.toml";

/// The version source `derive` runs unless told otherwise.
pub(crate) const DEFAULT_SOURCE: &str = "git";

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse: `{}`", _0.display())]
    RailyardToml(PathBuf, #[source] Box<toml::de::Error>),

    #[error("Invalid `pattern` in `{}`", _0.display())]
    Pattern(PathBuf, #[source] PatternError),
}

/// The contents of a `railyard.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct Options {
    /// A custom version pattern, used by every command that parses versions.
    pub(crate) pattern: Option<String>,
    /// The version source used by `railyard derive`.
    pub(crate) source: Option<String>,
}

/// The [`Options`] as loaded from a configuration file on disk.
#[derive(Debug, Clone)]
pub(crate) struct FilesystemOptions {
    path: PathBuf,
    options: Options,
}

impl FilesystemOptions {
    /// Find the [`FilesystemOptions`] for the given path.
    ///
    /// The search starts at the given path and goes up the directory tree until a
    /// `railyard.toml` file is found.
    pub(crate) fn find(path: &Path) -> Result<Option<Self>, Error> {
        for ancestor in path.ancestors() {
            let path = ancestor.join(CONFIG_FILE);
            match fs_err::read_to_string(&path) {
                Ok(content) => {
                    debug!("Found configuration at `{}`", path.display());
                    return Self::parse(path, &content).map(Some);
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(None)
    }

    /// Load a [`FilesystemOptions`] from a `railyard.toml` file.
    pub(crate) fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("Reading configuration from `{}`", path.display());
        let content = fs_err::read_to_string(path)?;
        Self::parse(path.to_path_buf(), &content)
    }

    fn parse(path: PathBuf, content: &str) -> Result<Self, Error> {
        let options = toml::from_str::<Options>(content)
            .map_err(|err| Error::RailyardToml(path.clone(), Box::new(err)))?;
        Ok(Self { path, options })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Convert the [`FilesystemOptions`] into [`Options`].
    pub(crate) fn into_options(self) -> Options {
        self.options
    }
}

impl Deref for FilesystemOptions {
    type Target = Options;

    fn deref(&self) -> &Self::Target {
        &self.options
    }
}

/// The resolved settings, combining command-line arguments, environment variables and the
/// configuration file, in that order of precedence.
#[derive(Debug, Clone, Default)]
pub(crate) struct Settings {
    /// The `pattern` of the configuration file, already compiled.
    pattern: Option<VersionPattern>,
    source: Option<String>,
}

impl Settings {
    /// Compile the options of a configuration file.
    pub(crate) fn from_filesystem(filesystem: Option<FilesystemOptions>) -> Result<Self, Error> {
        let Some(filesystem) = filesystem else {
            return Ok(Self::default());
        };
        let path = filesystem.path().to_path_buf();
        let options = filesystem.into_options();
        let pattern = options
            .pattern
            .as_deref()
            .map(VersionPattern::new)
            .transpose()
            .map_err(|err| Error::Pattern(path, err))?;
        Ok(Self {
            pattern,
            source: options.source,
        })
    }

    /// The version pattern: the command-line argument (or its environment variable), then the
    /// configuration file, then the default grammar.
    pub(crate) fn pattern(&self, arg: Option<&str>) -> Result<VersionPattern, PatternError> {
        match arg {
            Some(pattern) => VersionPattern::new(pattern),
            None => Ok(self.pattern.clone().unwrap_or_default()),
        }
    }

    /// The version source for `derive`.
    pub(crate) fn source(&self, arg: Option<String>) -> String {
        arg.or_else(|| self.source.clone())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
    }
}
