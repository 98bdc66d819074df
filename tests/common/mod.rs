//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, Write};
use std::os::fd::OwnedFd;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use vimgdb::config::{EditorConfig, ParserConfig};
use vimgdb::controller::Terminal;
use vimgdb::editor::{EditorChannel, EditorClient, EditorError};
use vimgdb::protocol::OutputParser;

/// Editor channel that remembers every key sequence it was asked to send.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl EditorChannel for RecordingChannel {
    fn send(&self, keys: &str) -> Result<(), EditorError> {
        self.sent.lock().push(keys.to_string());
        Ok(())
    }
}

/// Editor client with default prefix/suffix backed by a recorder.
pub fn recording_editor() -> (EditorClient, Arc<RecordingChannel>) {
    let channel = RecordingChannel::new();
    let client = EditorClient::new(channel.clone(), &EditorConfig::default());
    (client, channel)
}

pub fn default_parser() -> OutputParser {
    OutputParser::new(&ParserConfig::default()).expect("default patterns compile")
}

pub fn parser_with_limit(line_limit: usize) -> OutputParser {
    let config = ParserConfig {
        line_limit,
        ..ParserConfig::default()
    };
    OutputParser::new(&config).expect("default patterns compile")
}

/// A `Write` whose contents stay readable after it is moved into a thread.
#[derive(Clone, Default)]
pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write a config file into a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Keyboard input that never produces a byte or reaches end of file.
///
/// Keep the returned stream alive for as long as the input should stay open.
pub fn idle_keys() -> (File, UnixStream) {
    let (ours, theirs) = UnixStream::pair().expect("Failed to create socket pair");
    (File::from(OwnedFd::from(ours)), theirs)
}

/// A session terminal whose output and diagnostics are captured.
pub struct CapturedTerminal {
    pub terminal: Terminal,
    pub output: SharedBuffer,
    pub diagnostics: SharedBuffer,
}

pub fn captured_terminal(input: File) -> CapturedTerminal {
    let output = SharedBuffer::default();
    let diagnostics = SharedBuffer::default();
    CapturedTerminal {
        terminal: Terminal {
            input,
            output: Box::new(output.clone()),
            diagnostics: Box::new(diagnostics.clone()),
        },
        output,
        diagnostics,
    }
}
