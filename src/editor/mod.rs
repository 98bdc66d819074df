//! Everything that talks to the editor: the command vocabulary, the
//! remote-send transport and the pipe the editor writes back into.

mod channel;
mod command;
mod pipe;

use std::path::PathBuf;

pub use channel::{EditorChannel, EditorClient, EditorError, RemoteSend};
pub use command::EditorCommand;
pub use pipe::{open_fifo_reader, EditorPipe};

/// Where the session's editor lives and how it reaches us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorEndpoint {
    pub server: String,
    pub pipe: PathBuf,
    pub cwd: PathBuf,
}

impl EditorEndpoint {
    pub fn init_command(&self) -> EditorCommand {
        EditorCommand::Init {
            pipe: self.pipe.clone(),
            cwd: self.cwd.clone(),
        }
    }

    /// gdb command that tags the prompt with the server name.
    pub fn prompt_command(&self) -> String {
        format!("set prompt (vimgdb[{}]) \n", self.server)
    }
}
