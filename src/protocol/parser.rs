use crate::config::ParserConfig;
use crate::editor::EditorCommand;
use crate::protocol::event::{Event, LineKind};
use crate::protocol::line_buffer::{CompletedLine, LineBuffer, Push};
use crate::protocol::patterns::Patterns;

/// Ends the current-line highlight.
pub const RESET: &[u8] = b"\x1b[22;0m";

/// Side effect requested by a parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Editor(EditorCommand),
    /// Bytes to type into gdb.
    Debugger(String),
}

/// Streaming parser for gdb's output.
///
/// Every input byte is echoed to the terminal buffer; escape sequences are
/// only added around the highlighted source line. Completed lines are
/// classified and turned into [`Action`]s.
#[derive(Debug)]
pub struct OutputParser {
    patterns: Patterns,
    buffer: LineBuffer,
    last_line: Option<u32>,
    highlight: bool,
    highlight_on: Vec<u8>,
    context_lines: u32,
}

impl OutputParser {
    pub fn new(config: &ParserConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            patterns: Patterns::new()?,
            buffer: LineBuffer::new(config.line_limit),
            last_line: None,
            highlight: false,
            highlight_on: config.highlight.as_bytes().to_vec(),
            context_lines: config.context_lines,
        })
    }

    /// Feed one byte of debugger output.
    pub fn feed(&mut self, byte: u8, terminal: &mut Vec<u8>, actions: &mut Vec<Action>) {
        match self.buffer.push(byte) {
            Push::Pending => terminal.push(byte),
            Push::Line(line) => {
                if self.highlight {
                    terminal.extend_from_slice(RESET);
                    self.highlight = false;
                }
                self.complete(line, terminal, actions);
                terminal.push(b'\n');
            }
        }
    }

    /// Feed a chunk of debugger output.
    pub fn feed_all(&mut self, bytes: &[u8], terminal: &mut Vec<u8>, actions: &mut Vec<Action>) {
        for &byte in bytes {
            self.feed(byte, terminal, actions);
        }
    }

    pub fn last_line(&self) -> Option<u32> {
        self.last_line
    }

    pub fn is_highlighting(&self) -> bool {
        self.highlight
    }

    fn complete(&mut self, line: CompletedLine, terminal: &mut Vec<u8>, actions: &mut Vec<Action>) {
        if line.overflowed {
            return;
        }
        let text = line.bytes.strip_suffix(b"\r").unwrap_or(line.bytes.as_slice());

        match self.patterns.classify(text, self.last_line) {
            LineKind::Event(event) => self.handle(event, actions),
            LineKind::Anchor => {
                terminal.extend_from_slice(&self.highlight_on);
                self.highlight = true;
            }
            LineKind::Plain => {}
        }
    }

    fn handle(&mut self, event: Event, actions: &mut Vec<Action>) {
        tracing::debug!(?event, "debugger event");
        match event {
            Event::BreakpointSet { id, file, line } => {
                actions.push(Action::Editor(EditorCommand::Breakpoint { id, file, line }));
            }
            Event::BreakpointCleared { id } => {
                actions.push(Action::Editor(EditorCommand::ClearBreakpoint { id }));
            }
            Event::FrameStopped { file, line } => {
                self.last_line = Some(line);
                actions.push(Action::Editor(EditorCommand::DebugStop { file, line }));
                actions.push(Action::Debugger(self.list_command(line)));
            }
            // Recognised so it never falls through to another category;
            // what the editor should do with it is still undecided.
            Event::SourceDirsNotice { .. } => {}
        }
    }

    fn list_command(&self, line: u32) -> String {
        let first = line.saturating_sub(self.context_lines).max(1);
        let last = line.saturating_add(self.context_lines);
        format!("list {},{}\n", first, last)
    }
}
