//! Virtual-filesystem hook for git.
//!
//! git calls the `virtual-filesystem` hook (configured through
//! `core.virtualFilesystem`) to learn which paths of a virtualized working
//! tree it should look at. This crate answers by asking the enlistment's
//! mount service over a local socket and copying its reply to stdout.
//!
//! # Example
//!
//! ```no_run
//! use vfshook::{Config, Invocation};
//!
//! let invocation = Invocation::parse(std::env::args_os())?;
//! let mut stdout = std::io::stdout().lock();
//! vfshook::run(&invocation, &Config::from_env(), &mut stdout)?;
//! # Ok::<(), vfshook::Error>(())
//! ```

mod client;
mod config;
mod error;
mod invocation;
mod locate;

pub use client::{Client, PendingResponse};
pub use config::{Config, DEFAULT_LOG, ENV_LOG, ENV_PIPE};
pub use error::{Error, Result, ReturnCode};
pub use invocation::{Invalid, Invocation};
pub use locate::{DOT_DIR, PIPE_FILE, channel_path, enlistment_root, locate, resolve_self};
pub use vfshook_proto::RelaySummary;

/// Runs one exchange with the mount service, writing the payload to `sink`.
///
/// Locates the channel, connects, sends the request and relays the
/// response. The channel is closed before returning.
#[cfg(unix)]
pub fn run<W: std::io::Write + ?Sized>(
    invocation: &Invocation,
    config: &Config,
    sink: &mut W,
) -> Result<RelaySummary> {
    let pipe = channel_path(config, invocation)?;
    Client::connect(&pipe)?.modified_paths(sink)
}
