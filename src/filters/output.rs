use std::io::{self, Read, Write};

use crate::editor::EditorClient;
use crate::filters::FilterEnd;
use crate::protocol::{Action, OutputParser};
use crate::pty::DebuggerInput;

/// gdb → terminal, with the protocol parser in the middle.
///
/// Output is echoed as soon as it is read so prompts without a trailing
/// newline show up immediately. Editor commands are sent synchronously from
/// this thread, in the order their lines appeared.
pub struct OutputFilter<R, W> {
    reader: R,
    terminal: W,
    parser: OutputParser,
    editor: EditorClient,
    input: DebuggerInput,
}

impl<R: Read, W: Write> OutputFilter<R, W> {
    pub fn new(
        reader: R,
        terminal: W,
        parser: OutputParser,
        editor: EditorClient,
        input: DebuggerInput,
    ) -> Self {
        Self {
            reader,
            terminal,
            parser,
            editor,
            input,
        }
    }

    /// Relay until gdb's side of the pty closes.
    ///
    /// A partial line still in the parser when the stream ends has already
    /// been echoed; it is simply never matched.
    pub fn run(mut self) -> FilterEnd {
        let mut buf = [0u8; 1024];
        let mut echo = Vec::with_capacity(2 * buf.len());
        let mut actions = Vec::new();
        loop {
            let count = match self.reader.read(&mut buf) {
                Ok(0) => return FilterEnd::EndOfStream,
                Ok(count) => count,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                // Linux reports a pty whose slave side is gone as EIO.
                Err(err) if err.raw_os_error() == Some(libc::EIO) => {
                    return FilterEnd::EndOfStream
                }
                Err(err) => return FilterEnd::Failed(err),
            };

            self.parser.feed_all(&buf[..count], &mut echo, &mut actions);
            if let Err(err) = self
                .terminal
                .write_all(&echo)
                .and_then(|()| self.terminal.flush())
            {
                return FilterEnd::Failed(err);
            }
            echo.clear();

            for action in actions.drain(..) {
                self.dispatch(action);
            }
        }
    }

    fn dispatch(&self, action: Action) {
        match action {
            Action::Editor(command) => {
                if let Err(err) = self.editor.send(&command) {
                    tracing::warn!(error = %err, ?command, "editor command failed");
                }
            }
            Action::Debugger(text) => {
                if let Err(err) = self.input.send(text) {
                    tracing::warn!(error = %err, "could not queue debugger command");
                }
            }
        }
    }
}
