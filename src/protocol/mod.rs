//! Recognition of gdb's output: which lines mean something to the editor.

mod event;
mod line_buffer;
mod parser;
mod patterns;

pub use event::{Event, LineKind};
pub use line_buffer::{CompletedLine, LineBuffer, Push};
pub use parser::{Action, OutputParser, RESET};
pub use patterns::Patterns;
