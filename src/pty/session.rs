use parking_lot::Mutex;
use portable_pty::{
    native_pty_system, Child, ChildKiller, CommandBuilder, ExitStatus, MasterPty, PtySize,
};
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::sync::Arc;

use crate::config::DebuggerConfig;
use crate::error::SessionError;
use crate::pty::command::debugger_argv;

pub type SharedMaster = Arc<Mutex<Box<dyn MasterPty + Send>>>;

/// gdb running on its own pseudo-terminal.
pub struct DebuggerSession {
    master: SharedMaster,
    child: Box<dyn Child + Send + Sync>,
    program: String,
    user_args: Vec<String>,
}

/// The two ends of the pty stream, handed out once at startup.
pub struct DebuggerIo {
    /// gdb's output. Only the output filter reads it.
    pub reader: Box<dyn Read + Send>,
    /// gdb's input. Owned by the input pump.
    pub writer: Box<dyn Write + Send>,
}

impl DebuggerSession {
    pub fn open(
        config: &DebuggerConfig,
        user_args: &[String],
    ) -> Result<(Self, DebuggerIo), SessionError> {
        let pty_system = native_pty_system();
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(SessionError::pty)?;

        let argv = debugger_argv(config, user_args);
        let mut cmd = CommandBuilder::from_argv(argv.into_iter().map(OsString::from).collect());
        cmd.cwd(std::env::current_dir().map_err(SessionError::WorkingDir)?);

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| SessionError::spawn(&config.program, e))?;
        drop(pair.slave);

        let reader = pair.master.try_clone_reader().map_err(SessionError::pty)?;
        let writer = pair.master.take_writer().map_err(SessionError::pty)?;

        let session = Self {
            master: Arc::new(Mutex::new(pair.master)),
            child,
            program: config.program.clone(),
            user_args: user_args.to_vec(),
        };
        tracing::info!(
            program = %session.program,
            pid = ?session.pid(),
            args = %session.residual_args(),
            "debugger started"
        );

        Ok((session, DebuggerIo { reader, writer }))
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.process_id()
    }

    /// The user's arguments as one space-separated string.
    pub fn residual_args(&self) -> String {
        self.user_args.join(" ")
    }

    pub fn master(&self) -> SharedMaster {
        Arc::clone(&self.master)
    }

    /// Handle that can kill the debugger while another thread waits on it.
    pub fn killer(&self) -> Box<dyn ChildKiller + Send + Sync> {
        self.child.clone_killer()
    }

    /// Block until the debugger exits.
    pub fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }
}

/// Process exit code to report for the debugger's status.
pub fn exit_code(status: &ExitStatus) -> i32 {
    if status.success() {
        return 0;
    }
    i32::try_from(status.exit_code()).unwrap_or(1)
}
