//! Errors raised while exchanging a request with the mount service.

use std::io;

/// Failure of a single request/response exchange.
// Matched exhaustively by the hook's exit-code mapping.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request frame could not be written in full.
    #[error("failed to write to pipe: {0}")]
    Write(#[source] io::Error),

    /// A read failed before the response terminator arrived.
    #[error("read response from pipe failed: {source}")]
    Read {
        /// The underlying I/O error.
        #[source]
        source: io::Error,
        /// Raw bytes of the last chunk read before the failure, if any.
        last_chunk: Option<Vec<u8>>,
    },

    /// Relayed payload could not be written to the output sink.
    #[error("failed to write response to output: {0}")]
    Output(#[source] io::Error),

    /// The service answered with a non-success status.
    #[error("read response from pipe failed ({})", diagnostic(.chunk))]
    Status {
        /// The raw first chunk of the response.
        chunk: Vec<u8>,
    },
}

impl Error {
    /// Returns the raw OS error number behind this failure, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            Self::Write(e) | Self::Output(e) | Self::Read { source: e, .. } => e.raw_os_error(),
            Self::Status { .. } => None,
        }
    }

    /// Returns the response bytes worth showing in a diagnostic.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Write(_) | Self::Output(_) => None,
            Self::Read { last_chunk, .. } => last_chunk.as_deref().map(diagnostic),
            Self::Status { chunk } => Some(diagnostic(chunk)),
        }
    }
}

/// Renders raw response bytes as a single line of text.
pub(crate) fn diagnostic(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\n', '\r', '\0'])
        .to_owned()
}
