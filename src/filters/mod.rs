//! The three long-lived stream filters of a session.
//!
//! Each runs on its own OS thread because every one of them sits in a
//! blocking read. When a filter's loop ends it reports a [`FilterExit`] to
//! the controller.

mod output;
mod pipe_relay;
mod stdin_relay;

use std::fmt;
use std::io;
use std::os::unix::io::RawFd;
use std::thread;

use tokio::sync::mpsc::UnboundedSender;

pub use output::OutputFilter;
pub use pipe_relay::PipeRelay;
pub use stdin_relay::InputRelay;

/// How often relays wake up to look at the shutdown flag while idle.
pub const POLL_TICK_MS: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Input,
    EditorInput,
    Output,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Input => write!(f, "stdin filter"),
            FilterKind::EditorInput => write!(f, "editor pipe filter"),
            FilterKind::Output => write!(f, "debugger output filter"),
        }
    }
}

/// Why a filter loop ended.
#[derive(Debug)]
pub enum FilterEnd {
    /// The controller asked it to stop.
    Shutdown,
    /// Its source reached end of stream.
    EndOfStream,
    /// The debugger input queue is gone.
    InputClosed,
    Failed(io::Error),
}

impl fmt::Display for FilterEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterEnd::Shutdown => write!(f, "shut down"),
            FilterEnd::EndOfStream => write!(f, "EOF"),
            FilterEnd::InputClosed => write!(f, "debugger input closed"),
            FilterEnd::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

#[derive(Debug)]
pub struct FilterExit {
    pub kind: FilterKind,
    pub end: FilterEnd,
}

impl FilterExit {
    /// Whether this exit means the filter died while gdb was still running.
    ///
    /// The output filter reaching end of stream is how gdb exiting looks
    /// from the pty side, and it often lands before the wait does.
    pub fn is_unexpected(&self) -> bool {
        match (self.kind, &self.end) {
            (_, FilterEnd::Shutdown) => false,
            (FilterKind::Output, FilterEnd::EndOfStream) => false,
            _ => true,
        }
    }
}

/// Run `body` on a named thread and report how it ended on `exits`.
pub fn spawn_filter<F>(
    kind: FilterKind,
    exits: UnboundedSender<FilterExit>,
    body: F,
) -> io::Result<thread::JoinHandle<()>>
where
    F: FnOnce() -> FilterEnd + Send + 'static,
{
    thread::Builder::new()
        .name(format!("{:?}", kind).to_lowercase())
        .spawn(move || {
            tracing::debug!(filter = %kind, "filter started");
            let end = body();
            tracing::info!(filter = %kind, end = %end, "filter stopped");
            // The controller may already be gone during teardown.
            let _ = exits.send(FilterExit { kind, end });
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Readiness {
    /// Data or a hangup is pending; the next read won't block.
    Ready,
    Idle,
}

/// Wait up to `timeout_ms` for `fd` to become readable.
pub(crate) fn wait_readable(fd: RawFd, timeout_ms: i32) -> io::Result<Readiness> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let rc = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
    if rc < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(Readiness::Idle);
        }
        return Err(err);
    }
    if rc == 0 {
        return Ok(Readiness::Idle);
    }
    if pollfd.revents & libc::POLLNVAL != 0 {
        return Err(io::Error::from_raw_os_error(libc::EBADF));
    }
    Ok(Readiness::Ready)
}
