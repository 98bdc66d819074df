use std::io::{self, Write};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("debugger input is closed")]
pub struct InputClosed;

/// Cloneable handle for typing into gdb.
///
/// Every writer (stdin relay, editor pipe relay, output filter, controller)
/// goes through one queue drained by a single pump thread, so each submitted
/// chunk reaches the pty whole. Chunks from different writers are ordered by
/// arrival only.
#[derive(Clone)]
pub struct DebuggerInput {
    sender: Sender<Vec<u8>>,
}

impl DebuggerInput {
    pub fn send(&self, bytes: impl Into<Vec<u8>>) -> Result<(), InputClosed> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Ok(());
        }
        self.sender.send(bytes).map_err(|_| InputClosed)
    }
}

/// The thread that owns the pty writer.
pub struct InputPump {
    handle: thread::JoinHandle<io::Result<u64>>,
}

impl InputPump {
    /// Start pumping into `writer`. The pump stops when every
    /// [`DebuggerInput`] clone is dropped or a write fails.
    pub fn spawn<W>(writer: W) -> io::Result<(DebuggerInput, InputPump)>
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = channel();
        let handle = thread::Builder::new()
            .name("debugger-input".to_string())
            .spawn(move || pump(receiver, writer))?;
        Ok((DebuggerInput { sender }, InputPump { handle }))
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the pump to drain and return the number of bytes written.
    pub fn join(self) -> io::Result<u64> {
        self.handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("debugger input pump panicked")))
    }
}

fn pump<W: Write>(receiver: Receiver<Vec<u8>>, mut writer: W) -> io::Result<u64> {
    let mut written = 0u64;
    for chunk in receiver {
        if let Err(err) = writer.write_all(&chunk).and_then(|()| writer.flush()) {
            tracing::warn!(error = %err, "debugger input write failed");
            return Err(err);
        }
        written += chunk.len() as u64;
    }
    tracing::debug!(written, "debugger input closed");
    Ok(written)
}
