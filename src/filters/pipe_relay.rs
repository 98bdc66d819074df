use std::fs::File;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;

use crate::editor::open_fifo_reader;
use crate::filters::{wait_readable, FilterEnd, Readiness, POLL_TICK_MS};
use crate::pty::DebuggerInput;
use crate::shutdown::ShutdownHandle;

/// Editor pipe → gdb. Bytes are forwarded untouched.
///
/// The editor opens and closes its end whenever it likes, so end of stream
/// only means "wait for the next writer": the pipe is re-opened and the
/// relay carries on until shutdown. On Linux the read-write open in
/// [`open_fifo_reader`] keeps end of stream from happening at all.
pub struct PipeRelay {
    path: PathBuf,
    input: DebuggerInput,
    shutdown: ShutdownHandle,
}

enum Session {
    WriterGone,
    Ended(FilterEnd),
}

impl PipeRelay {
    pub fn new(path: PathBuf, input: DebuggerInput, shutdown: ShutdownHandle) -> Self {
        Self {
            path,
            input,
            shutdown,
        }
    }

    pub fn run(self) -> FilterEnd {
        loop {
            if self.shutdown.is_shutting_down() {
                return FilterEnd::Shutdown;
            }
            let file = match open_fifo_reader(&self.path) {
                Ok(file) => file,
                Err(err) => return FilterEnd::Failed(err),
            };
            match self.relay(file) {
                Session::WriterGone => {
                    tracing::debug!(path = %self.path.display(), "editor closed pipe, reopening");
                }
                Session::Ended(end) => return end,
            }
        }
    }

    fn relay(&self, mut file: File) -> Session {
        let fd = file.as_raw_fd();
        let mut buf = [0u8; 1024];
        loop {
            if self.shutdown.is_shutting_down() {
                return Session::Ended(FilterEnd::Shutdown);
            }
            match wait_readable(fd, POLL_TICK_MS) {
                Ok(Readiness::Idle) => continue,
                Ok(Readiness::Ready) => {}
                Err(err) => return Session::Ended(FilterEnd::Failed(err)),
            }
            let count = match file.read(&mut buf) {
                Ok(0) => return Session::WriterGone,
                Ok(count) => count,
                Err(err)
                    if matches!(
                        err.kind(),
                        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                    ) =>
                {
                    continue
                }
                Err(err) => return Session::Ended(FilterEnd::Failed(err)),
            };
            if self.input.send(&buf[..count]).is_err() {
                return Session::Ended(FilterEnd::InputClosed);
            }
        }
    }
}
