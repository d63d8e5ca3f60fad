//! Wire protocol between the virtual-filesystem hook and the mount service.
//!
//! The exchange is a single line-oriented request followed by one streamed
//! response over any reliable byte stream (Unix socket, named pipe):
//!
//! ```text
//! hook    -> service   MPL|1\n
//! service -> hook      S <payload bytes...>\n
//! ```
//!
//! The first byte of the response is the status (`S` for success), the
//! second byte is opaque, and the last byte of the stream is a newline that
//! is not part of the payload.

mod codec;
mod error;
mod message;

pub use codec::{Decoder, Phase, RelaySummary, SCRATCH_LEN, encode, relay};
pub use error::Error;
pub use message::{
    MODIFIED_PATHS_TAG, PROTOCOL_VERSION, Request, STATUS_LEN, SUCCESS_MARKER, TERMINATOR,
};
