use std::io::{self, Read};
use std::os::unix::io::AsRawFd;

use crate::filters::{wait_readable, FilterEnd, Readiness, POLL_TICK_MS};
use crate::pty::DebuggerInput;
use crate::shutdown::ShutdownHandle;

/// Terminal → gdb. Bytes are forwarded untouched.
pub struct InputRelay<R> {
    source: R,
    input: DebuggerInput,
    shutdown: ShutdownHandle,
}

impl<R: Read + AsRawFd> InputRelay<R> {
    pub fn new(source: R, input: DebuggerInput, shutdown: ShutdownHandle) -> Self {
        Self {
            source,
            input,
            shutdown,
        }
    }

    pub fn run(mut self) -> FilterEnd {
        let fd = self.source.as_raw_fd();
        let mut buf = [0u8; 1024];
        loop {
            if self.shutdown.is_shutting_down() {
                return FilterEnd::Shutdown;
            }
            match wait_readable(fd, POLL_TICK_MS) {
                Ok(Readiness::Idle) => continue,
                Ok(Readiness::Ready) => {}
                Err(err) => return FilterEnd::Failed(err),
            }
            let count = match self.source.read(&mut buf) {
                Ok(0) => return FilterEnd::EndOfStream,
                Ok(count) => count,
                Err(err)
                    if matches!(
                        err.kind(),
                        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                    ) =>
                {
                    continue
                }
                Err(err) => return FilterEnd::Failed(err),
            };
            if self.input.send(&buf[..count]).is_err() {
                return FilterEnd::InputClosed;
            }
        }
    }
}
