//! Validation of the hook's command line.
//!
//! git runs the hook as `virtual-filesystem <version>`; anything else is
//! rejected before the environment is read or any channel is touched.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use vfshook_proto::PROTOCOL_VERSION;

/// Why the command line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Invalid {
    /// Not exactly one positional argument.
    #[error("Invalid arguments (expected 1, got {0})")]
    ArgumentCount(usize),
    /// The requested protocol version is not supported.
    #[error("Bad version ({0})")]
    BadVersion(String),
}

/// A validated hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Path the hook was started as (`argv[0]`); empty if the host gave none.
    program: PathBuf,
}

impl Invocation {
    /// Validates a full argument vector, program path first.
    pub fn parse<I, T>(args: I) -> Result<Self, Invalid>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut iter = args.into_iter().map(|arg| -> OsString { arg.into() });
        let program = iter.next().map(PathBuf::from).unwrap_or_default();
        let rest: Vec<OsString> = iter.collect();

        let [version] = rest.as_slice() else {
            return Err(Invalid::ArgumentCount(rest.len()));
        };
        if version.to_str() != Some(PROTOCOL_VERSION) {
            return Err(Invalid::BadVersion(version.to_string_lossy().into_owned()));
        }

        Ok(Self { program })
    }

    /// Path the hook was started as.
    pub fn program(&self) -> &Path {
        &self.program
    }
}
