/// Declares all environment variables read by `railyard`.
pub(crate) struct EnvVars;

impl EnvVars {
    /// Equivalent to the `--config-file` command-line argument. Expects a path to a
    /// `railyard.toml` file to use for configuration.
    pub(crate) const RAILYARD_CONFIG_FILE: &'static str = "RAILYARD_CONFIG_FILE";

    /// Equivalent to the `--no-config` command-line argument. If set, `railyard` will not read
    /// any configuration files from the current directory or its parents.
    pub(crate) const RAILYARD_NO_CONFIG: &'static str = "RAILYARD_NO_CONFIG";

    /// Equivalent to the `--pattern` command-line argument. Takes precedence over the `pattern`
    /// of a `railyard.toml` file.
    pub(crate) const RAILYARD_VERSION_PATTERN: &'static str = "RAILYARD_VERSION_PATTERN";

    /// The log filter, e.g., `RUST_LOG=railyard_git=trace`. See the `tracing-subscriber`
    /// documentation for the syntax.
    pub(crate) const RUST_LOG: &'static str = "RUST_LOG";
}
