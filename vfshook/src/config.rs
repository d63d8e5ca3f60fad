//! Environment-driven configuration.
//!
//! git starts the hook with a fixed command line, so the only knobs are
//! environment variables.

use std::ffi::OsString;
use std::path::PathBuf;

/// Overrides the channel endpoint and skips the enlistment search.
pub const ENV_PIPE: &str = "VFSHOOK_PIPE";

/// Log filter directive for the stderr logger (e.g. `debug`).
pub const ENV_LOG: &str = "VFSHOOK_LOG";

/// Filter used when [`ENV_LOG`] is unset or empty.
pub const DEFAULT_LOG: &str = "warn";

/// Settings for one hook invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Config {
    /// Explicit channel endpoint.
    pub pipe: Option<PathBuf>,
    /// Log filter directive.
    pub log: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var_os(key))
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            pipe: var(ENV_PIPE).map(PathBuf::from),
            log: var(ENV_LOG).map(|v| v.to_string_lossy().into_owned()),
        }
    }

    /// Sets an explicit channel endpoint.
    #[must_use]
    pub fn with_pipe(mut self, pipe: impl Into<PathBuf>) -> Self {
        self.pipe = Some(pipe.into());
        self
    }

    /// Returns the log filter directive to install.
    pub fn log_filter(&self) -> &str {
        self.log.as_deref().unwrap_or(DEFAULT_LOG)
    }
}
