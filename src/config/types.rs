use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub debugger: DebuggerConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub pipe: PipeConfig,
}

/// How to reach the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor executable used for `--remote-send` (e.g. "gvim", "vim").
    #[serde(default = "default_editor_program")]
    pub program: String,
    /// Server name used when `--server` is not given.
    #[serde(default = "default_server")]
    pub server: String,
    /// Keys sent before every command to get into command-line mode.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Keys sent after every command.
    #[serde(default)]
    pub command_suffix: String,
}

/// How to start the debugger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebuggerConfig {
    /// Debugger executable.
    #[serde(default = "default_debugger_program")]
    pub program: String,
    /// Arguments placed before the user's own. `-f` makes gdb print
    /// `\x1a\x1afile:line` markers when a frame is shown.
    #[serde(default = "default_debugger_args")]
    pub args: Vec<String>,
    /// Replace the gdb prompt with `(vimgdb[SERVER])`.
    #[serde(default = "default_true")]
    pub set_prompt: bool,
}

/// Output parser tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Longest debugger output line that is still matched against patterns.
    #[serde(default = "default_line_limit")]
    pub line_limit: usize,
    /// Lines listed on each side of the current line when a frame stops.
    #[serde(default = "default_context_lines")]
    pub context_lines: u32,
    /// Escape sequence that starts highlighting the current source line.
    #[serde(default = "default_highlight")]
    pub highlight: String,
}

/// Where the editor pipe is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeConfig {
    /// Parent directory; defaults to the system temp dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

pub const DEFAULT_SERVER: &str = "GVIM";

fn default_editor_program() -> String {
    "gvim".to_string()
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_command_prefix() -> String {
    "<C-\\><C-N>".to_string()
}

fn default_debugger_program() -> String {
    "gdb".to_string()
}

fn default_debugger_args() -> Vec<String> {
    vec!["-f".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_line_limit() -> usize {
    1000
}

fn default_context_lines() -> u32 {
    10
}

fn default_highlight() -> String {
    "\x1b[1;44m".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            program: default_editor_program(),
            server: default_server(),
            command_prefix: default_command_prefix(),
            command_suffix: String::new(),
        }
    }
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            program: default_debugger_program(),
            args: default_debugger_args(),
            set_prompt: true,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            line_limit: default_line_limit(),
            context_lines: default_context_lines(),
            highlight: default_highlight(),
        }
    }
}
