//! virtual-filesystem — git hook that relays modified paths from the mount
//! service.
//!
//! git runs `virtual-filesystem 1` and reads the NUL-separated path list
//! from stdout. Logs and diagnostics go to stderr; stdout carries nothing
//! but the service's payload.

// Hook is a standalone binary — stderr is the correct error channel.
#![allow(clippy::print_stderr)]

use std::process::ExitCode;

#[cfg(not(unix))]
fn main() -> ExitCode {
    eprintln!("[virtual-filesystem] only supported on Unix");
    vfshook::ReturnCode::InvalidInvocation.into()
}

#[cfg(unix)]
fn main() -> ExitCode {
    match hook() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => die(&e),
    }
}

/// Validates the command line, then performs the exchange.
#[cfg(unix)]
fn hook() -> vfshook::Result<()> {
    use std::io::{self, Write};

    let invocation = vfshook::Invocation::parse(std::env::args_os())?;
    let config = vfshook::Config::from_env();
    init_logging(&config);

    let mut stdout = io::BufWriter::new(io::stdout().lock());
    match vfshook::run(&invocation, &config, &mut stdout) {
        Ok(summary) => {
            stdout.flush().map_err(vfshook::Error::OutputFailed)?;
            tracing::debug!(
                reads = summary.reads,
                bytes = summary.payload_bytes,
                "done"
            );
            Ok(())
        }
        Err(e) => {
            // Whatever was relayed before the failure still goes out.
            let _ = stdout.flush();
            Err(e)
        }
    }
}

/// Installs the stderr logger, filtered by `VFSHOOK_LOG`.
#[cfg(unix)]
fn init_logging(config: &vfshook::Config) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(config.log_filter())
        .unwrap_or_else(|_| EnvFilter::new(vfshook::DEFAULT_LOG));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

/// Reports a fatal error and picks the matching exit code.
#[cfg(unix)]
fn die(err: &vfshook::Error) -> ExitCode {
    let code = err.exit_code();
    tracing::debug!(code = code.code(), os_error = ?err.os_code(), "hook failed");
    eprintln!("[virtual-filesystem] {err}");
    code.into()
}
