use portable_pty::PtySize;
use std::io;
use std::thread;

use crossterm::terminal::size as terminal_size;
use signal_hook::consts::signal::SIGWINCH;
use signal_hook::iterator::Signals;

use crate::pty::session::SharedMaster;

/// Keeps gdb's pty the same size as the real terminal.
pub struct ResizeWatcher {
    handle: signal_hook::iterator::Handle,
    thread: thread::JoinHandle<()>,
}

impl ResizeWatcher {
    pub fn start(master: SharedMaster) -> io::Result<Self> {
        let mut signals = Signals::new([SIGWINCH])?;
        let handle = signals.handle();
        let thread = thread::Builder::new()
            .name("pty-resize".to_string())
            .spawn(move || {
                for _ in signals.forever() {
                    let (cols, rows) = match terminal_size() {
                        Ok(size) => size,
                        Err(_) => continue,
                    };
                    let size = PtySize {
                        rows,
                        cols,
                        pixel_width: 0,
                        pixel_height: 0,
                    };
                    if let Err(err) = master.lock().resize(size) {
                        tracing::debug!(error = %err, "pty resize failed");
                    }
                }
            })?;
        Ok(Self { handle, thread })
    }

    pub fn stop(self) {
        self.handle.close();
        let _ = self.thread.join();
    }
}
