mod command;
mod input;
mod resize;
mod session;

pub use command::debugger_argv;
pub use input::{DebuggerInput, InputClosed, InputPump};
pub use resize::ResizeWatcher;
pub use session::{exit_code, DebuggerIo, DebuggerSession, SharedMaster};
