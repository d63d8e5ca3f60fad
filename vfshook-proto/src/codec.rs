//! Request encoding and the streaming response decoder.
//!
//! The response has no length prefix: the decoder strips the status prefix
//! from the start of the stream and stops at the first chunk whose payload
//! ends with [`TERMINATOR`].

use std::io::{self, Read, Write};

use crate::error::Error;
use crate::message::{Request, STATUS_LEN, SUCCESS_MARKER, TERMINATOR};

/// Size of the scratch buffer used for each read from the channel.
pub const SCRATCH_LEN: usize = 1024;

/// Writes the full frame for `request` to `w` and flushes it.
pub fn encode<W: Write + ?Sized>(w: &mut W, request: Request) -> Result<(), Error> {
    let frame = request.frame();
    w.write_all(frame)
        .and_then(|()| w.flush())
        .map_err(Error::Write)?;
    tracing::debug!(tag = request.tag(), len = frame.len(), "request sent");
    Ok(())
}

/// Where the decoder is within the response stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    /// Still inside the status prefix.
    Status {
        /// Prefix bytes not yet seen.
        remaining: usize,
    },
    /// Relaying payload.
    Body,
    /// The terminator has been seen; nothing more is expected.
    Terminated,
}

/// Incremental decoder for one response stream.
///
/// Chunk boundaries do not affect the decoded payload, except that the
/// response ends at the first chunk whose last byte is the terminator.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    /// Current position in the stream.
    phase: Phase,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Creates a decoder positioned at the start of a response.
    pub const fn new() -> Self {
        Self {
            phase: Phase::Status {
                remaining: STATUS_LEN,
            },
        }
    }

    /// Returns the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the end of the response has been reached.
    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Consumes one chunk and returns the payload bytes it carries.
    ///
    /// Fails with [`Error::Status`] if the first byte of the stream is not
    /// the success marker. Chunks fed after termination yield nothing.
    pub fn feed<'a>(&mut self, chunk: &'a [u8]) -> Result<&'a [u8], Error> {
        let mut payload = chunk;

        if let Phase::Status { remaining } = self.phase {
            if remaining == STATUS_LEN && chunk.first().is_some_and(|&b| b != SUCCESS_MARKER) {
                return Err(Error::Status {
                    chunk: chunk.to_vec(),
                });
            }
            // The second prefix byte is opaque.
            let skip = remaining.min(chunk.len());
            payload = &chunk[skip..];
            self.phase = if skip == remaining {
                Phase::Body
            } else {
                Phase::Status {
                    remaining: remaining - skip,
                }
            };
        }

        match self.phase {
            Phase::Status { .. } | Phase::Terminated => Ok(&[]),
            Phase::Body => match payload.split_last() {
                Some((&TERMINATOR, body)) => {
                    self.phase = Phase::Terminated;
                    Ok(body)
                }
                _ => Ok(payload),
            },
        }
    }
}

/// Counters reported by a successful [`relay`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct RelaySummary {
    /// Number of successful non-empty reads from the channel.
    pub reads: usize,
    /// Payload bytes written to the sink.
    pub payload_bytes: u64,
}

/// Reads one response from `reader` and copies its payload to `sink`.
///
/// Blocks until the terminator arrives. A stream that ends before any byte
/// is an empty response; one that ends mid-response is a read failure.
/// Payload already written to `sink` stays written when a later read fails.
pub fn relay<R, W>(reader: &mut R, sink: &mut W) -> Result<RelaySummary, Error>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut scratch = [0u8; SCRATCH_LEN];
    let mut last_len = 0;
    let mut decoder = Decoder::new();
    let mut summary = RelaySummary::default();

    while !decoder.is_terminated() {
        let n = match reader.read(&mut scratch) {
            Ok(0) if summary.reads == 0 => {
                tracing::debug!("service closed the pipe without a response");
                break;
            }
            Ok(0) => {
                return Err(Error::Read {
                    source: io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "pipe closed before end of response",
                    ),
                    last_chunk: Some(scratch[..last_len].to_vec()),
                });
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // A failed read leaves the buffer untouched.
                return Err(Error::Read {
                    source: e,
                    last_chunk: (last_len > 0).then(|| scratch[..last_len].to_vec()),
                });
            }
        };
        last_len = n;
        summary.reads += 1;
        tracing::trace!(len = n, "response chunk");

        let payload = decoder.feed(&scratch[..n])?;
        sink.write_all(payload).map_err(Error::Output)?;
        summary.payload_bytes += payload.len() as u64;
    }

    sink.flush().map_err(Error::Output)?;
    Ok(summary)
}
