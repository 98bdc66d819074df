use std::process::{Command, Stdio};
use std::sync::Arc;

use thiserror::Error;

use crate::config::EditorConfig;
use crate::editor::command::EditorCommand;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status} while sending to server '{server}'")]
    Rejected {
        program: String,
        server: String,
        status: std::process::ExitStatus,
    },
}

/// Delivers a raw key sequence to a running editor instance.
pub trait EditorChannel: Send + Sync {
    fn send(&self, keys: &str) -> Result<(), EditorError>;
}

/// `vim --servername NAME --remote-send KEYS`, run without a shell.
///
/// Blocks until the editor process exits. Each call is independent.
#[derive(Debug, Clone)]
pub struct RemoteSend {
    program: String,
    server: String,
}

impl RemoteSend {
    pub fn new(program: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            server: server.into(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.program.clone(), config.server.clone())
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// Argument vector passed to the editor program.
    pub fn args<'a>(&'a self, keys: &'a str) -> [&'a str; 8] {
        [
            "--servername",
            self.server.as_str(),
            "-u",
            "NONE",
            "-U",
            "NONE",
            "--remote-send",
            keys,
        ]
    }
}

impl EditorChannel for RemoteSend {
    fn send(&self, keys: &str) -> Result<(), EditorError> {
        let status = Command::new(&self.program)
            .args(self.args(keys))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| EditorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(EditorError::Rejected {
                program: self.program.clone(),
                server: self.server.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Turns [`EditorCommand`]s into key sequences and sends them.
///
/// Cheap to clone; shared by the controller and the output filter. No
/// locking: concurrent sends are separate editor invocations and their
/// relative order is unspecified.
#[derive(Clone)]
pub struct EditorClient {
    channel: Arc<dyn EditorChannel>,
    prefix: Arc<str>,
    suffix: Arc<str>,
}

impl EditorClient {
    pub fn new(channel: Arc<dyn EditorChannel>, config: &EditorConfig) -> Self {
        Self {
            channel,
            prefix: Arc::from(config.command_prefix.as_str()),
            suffix: Arc::from(config.command_suffix.as_str()),
        }
    }

    /// Full key sequence for `command`: prefix, body, suffix.
    pub fn compose(&self, command: &EditorCommand) -> String {
        [self.prefix.as_ref(), command.render().as_str(), self.suffix.as_ref()].concat()
    }

    pub fn send(&self, command: &EditorCommand) -> Result<(), EditorError> {
        let keys = self.compose(command);
        tracing::debug!(keys = %keys, "sending editor command");
        self.channel.send(&keys)
    }
}
