//! Error types and process exit codes for the hook.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::invocation::Invalid;

/// Alias for `Result<T, vfshook::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a hook invocation.
///
/// Every variant is terminal; the binary reports it and exits with
/// [`Error::exit_code`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Wrong argument count or unsupported protocol version.
    #[error(transparent)]
    InvalidInvocation(#[from] Invalid),

    /// The hook's own location could not be resolved.
    #[error("failed to resolve hook location: {0}")]
    SelfPath(#[source] io::Error),

    /// No enlistment root above the hook executable.
    #[error("{} is not inside a virtualized enlistment", .path.display())]
    NotInEnlistment {
        /// Path the search started from.
        path: PathBuf,
    },

    /// The channel to the mount service could not be opened.
    #[error("failed to connect to pipe {}: {source}", .path.display())]
    Connect {
        /// Channel endpoint that was tried.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The request frame could not be written in full.
    #[error("failed to write to pipe: {0}")]
    ChannelWriteFailed(#[source] io::Error),

    /// A response read failed before the terminator arrived.
    #[error("read response from pipe failed: {source}{}", suffix(.diagnostic))]
    ChannelReadFailed {
        /// The underlying I/O error.
        #[source]
        source: io::Error,
        /// The last chunk read, rendered as text.
        diagnostic: Option<String>,
    },

    /// The mount service answered with a non-success status.
    #[error("read response from pipe failed ({message})")]
    ProtocolError {
        /// The service's first response chunk, rendered as text.
        message: String,
    },

    /// Relayed payload could not be written to standard output.
    #[error("failed to write response to output: {0}")]
    OutputFailed(#[source] io::Error),
}

/// Formats an optional diagnostic as a trailing parenthetical.
fn suffix(diagnostic: &Option<String>) -> String {
    diagnostic
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl Error {
    /// Returns the exit code reported to the invoking host.
    pub const fn exit_code(&self) -> ReturnCode {
        match self {
            Self::InvalidInvocation(_) => ReturnCode::InvalidInvocation,
            Self::SelfPath(_) => ReturnCode::SelfPathFailure,
            Self::NotInEnlistment { .. } => ReturnCode::NotInEnlistment,
            Self::Connect { .. } => ReturnCode::PipeConnectError,
            Self::ChannelWriteFailed(_) => ReturnCode::PipeWriteFailed,
            Self::ChannelReadFailed { .. } => ReturnCode::PipeReadFailed,
            Self::ProtocolError { .. } => ReturnCode::ServiceFailure,
            Self::OutputFailed(_) => ReturnCode::OutputFailed,
        }
    }

    /// Returns the raw OS error number behind this failure, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            Self::SelfPath(e)
            | Self::Connect { source: e, .. }
            | Self::ChannelWriteFailed(e)
            | Self::ChannelReadFailed { source: e, .. }
            | Self::OutputFailed(e) => e.raw_os_error(),
            Self::InvalidInvocation(_) | Self::NotInEnlistment { .. } | Self::ProtocolError { .. } => {
                None
            }
        }
    }
}

impl From<vfshook_proto::Error> for Error {
    fn from(err: vfshook_proto::Error) -> Self {
        let diagnostic = err.diagnostic();
        match err {
            vfshook_proto::Error::Write(e) => Self::ChannelWriteFailed(e),
            vfshook_proto::Error::Read { source, .. } => Self::ChannelReadFailed { source, diagnostic },
            vfshook_proto::Error::Output(e) => Self::OutputFailed(e),
            vfshook_proto::Error::Status { .. } => Self::ProtocolError {
                message: diagnostic.unwrap_or_default(),
            },
        }
    }
}

/// Process exit codes, numbered to line up with the host's other hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[non_exhaustive]
pub enum ReturnCode {
    /// The response was relayed in full.
    Success = 0,
    /// The hook's own path or the working directory was unavailable.
    SelfPathFailure = 2,
    /// The hook does not live inside an enlistment.
    NotInEnlistment = 3,
    /// The mount service's channel could not be opened.
    PipeConnectError = 4,
    /// The request could not be written.
    PipeWriteFailed = 7,
    /// The response could not be read.
    PipeReadFailed = 8,
    /// Wrong arguments or unsupported protocol version.
    InvalidInvocation = 11,
    /// The mount service reported a non-success status.
    ServiceFailure = 12,
    /// Standard output rejected the relayed payload.
    OutputFailed = 13,
}

impl ReturnCode {
    /// Every code the hook can exit with.
    pub const ALL: [Self; 9] = [
        Self::Success,
        Self::SelfPathFailure,
        Self::NotInEnlistment,
        Self::PipeConnectError,
        Self::PipeWriteFailed,
        Self::PipeReadFailed,
        Self::InvalidInvocation,
        Self::ServiceFailure,
        Self::OutputFailed,
    ];

    /// Returns the numeric exit status.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<ReturnCode> for ExitCode {
    fn from(code: ReturnCode) -> Self {
        Self::from(code.code())
    }
}
