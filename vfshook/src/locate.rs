//! Locating the mount service's channel from the hook's own path.
//!
//! The hook is installed inside the enlistment it serves, at
//! `<root>/src/.git/hooks/virtual-filesystem`. The enlistment root is the
//! nearest ancestor holding a [`DOT_DIR`] directory, and the mount service
//! listens on [`PIPE_FILE`] inside it.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::invocation::Invocation;

/// Per-enlistment metadata directory that marks the enlistment root.
pub const DOT_DIR: &str = ".gvfs";

/// Socket file the mount service listens on, inside [`DOT_DIR`].
pub const PIPE_FILE: &str = "GVFS_NetCorePipe";

/// Returns the enlistment root enclosing `path`, if any.
pub fn enlistment_root(path: &Path) -> Option<&Path> {
    path.ancestors().find(|dir| dir.join(DOT_DIR).is_dir())
}

/// Derives the channel endpoint from the hook executable's path.
pub fn locate(self_path: &Path) -> Result<PathBuf> {
    let root = enlistment_root(self_path).ok_or_else(|| Error::NotInEnlistment {
        path: self_path.to_path_buf(),
    })?;
    Ok(root.join(DOT_DIR).join(PIPE_FILE))
}

/// Turns the path the hook was started as into an absolute path.
///
/// A bare program name carries no location, so the running executable's
/// path is used instead.
pub fn resolve_self(program: &Path) -> Result<PathBuf> {
    if program.is_absolute() {
        return Ok(program.to_path_buf());
    }
    if program.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
        let cwd = std::env::current_dir().map_err(Error::SelfPath)?;
        return Ok(cwd.join(program));
    }
    std::env::current_exe().map_err(Error::SelfPath)
}

/// Picks the channel endpoint for `invocation`, honouring overrides.
pub fn channel_path(config: &Config, invocation: &Invocation) -> Result<PathBuf> {
    if let Some(pipe) = &config.pipe {
        tracing::debug!(pipe = %pipe.display(), "using configured pipe");
        return Ok(pipe.clone());
    }
    let self_path = resolve_self(invocation.program())?;
    let pipe = locate(&self_path)?;
    tracing::debug!(hook = %self_path.display(), pipe = %pipe.display(), "located pipe");
    Ok(pipe)
}
