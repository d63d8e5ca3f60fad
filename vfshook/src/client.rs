//! Client side of the hook's exchange with the mount service.
//!
//! A connection carries exactly one request and one response. The type
//! system enforces the order: [`Client::send_request`] consumes the client
//! and hands back a [`PendingResponse`], the only thing that can read.
//! Dropping either value closes the channel.

use std::io::{Read, Write};

use vfshook_proto::{RelaySummary, Request};

use crate::error::Result;

/// A connected channel that has not been used yet.
#[derive(Debug)]
pub struct Client<S> {
    /// The underlying byte stream.
    stream: S,
}

/// A channel whose request has been written; the response is unread.
#[derive(Debug)]
pub struct PendingResponse<S> {
    /// The underlying byte stream.
    stream: S,
}

impl<S: Read + Write> Client<S> {
    /// Wraps an already-connected stream.
    pub const fn from_stream(stream: S) -> Self {
        Self { stream }
    }

    /// Writes the modified-paths request.
    pub fn send_request(mut self) -> Result<PendingResponse<S>> {
        vfshook_proto::encode(&mut self.stream, Request::ModifiedPathsList)?;
        Ok(PendingResponse {
            stream: self.stream,
        })
    }

    /// Sends the request and relays the whole response to `sink`.
    pub fn modified_paths<W: Write + ?Sized>(self, sink: &mut W) -> Result<RelaySummary> {
        self.send_request()?.receive_response(sink)
    }
}

impl<S: Read> PendingResponse<S> {
    /// Reads the response and copies its payload to `sink`, unchanged.
    pub fn receive_response<W: Write + ?Sized>(mut self, sink: &mut W) -> Result<RelaySummary> {
        let summary = vfshook_proto::relay(&mut self.stream, sink)?;
        tracing::debug!(
            reads = summary.reads,
            bytes = summary.payload_bytes,
            "response relayed"
        );
        Ok(summary)
    }
}

#[cfg(unix)]
mod unix {
    use std::os::unix::net::UnixStream;
    use std::path::Path;

    use super::Client;
    use crate::error::{Error, Result};

    impl Client<UnixStream> {
        /// Connects to the mount service's Unix socket. One attempt only.
        pub fn connect(path: impl AsRef<Path>) -> Result<Self> {
            let pipe = path.as_ref();
            let stream = UnixStream::connect(pipe).map_err(|source| Error::Connect {
                path: pipe.to_path_buf(),
                source,
            })?;
            tracing::debug!(pipe = %pipe.display(), "connected");
            Ok(Self::from_stream(stream))
        }
    }
}
