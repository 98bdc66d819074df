use std::path::PathBuf;

use crate::config::types::{Config, DebuggerConfig, EditorConfig, ParserConfig};

/// Resolved, immutable settings for one session.
///
/// Built once from the config file and the command line, then handed to
/// the controller. Nothing reads process-wide state after this point.
#[derive(Debug, Clone)]
pub struct Settings {
    pub editor: EditorConfig,
    pub debugger: DebuggerConfig,
    pub parser: ParserConfig,
    pub pipe_dir: PathBuf,
    /// Arguments passed through to the debugger after its own flags.
    pub debugger_args: Vec<String>,
}

impl Settings {
    /// Merge the config file with command-line overrides.
    ///
    /// An empty or blank `server` override is ignored, like a missing one.
    pub fn resolve(config: Config, server: Option<String>, debugger_args: Vec<String>) -> Self {
        let mut editor = config.editor;
        if let Some(server) = server.filter(|s| !s.trim().is_empty()) {
            editor.server = server;
        }
        let pipe_dir = config.pipe.dir.unwrap_or_else(std::env::temp_dir);
        Self {
            editor,
            debugger: config.debugger,
            parser: config.parser,
            pipe_dir,
            debugger_args,
        }
    }

    pub fn server(&self) -> &str {
        &self.editor.server
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SERVER;

    #[test]
    fn server_defaults_to_gvim() {
        let settings = Settings::resolve(Config::default(), None, Vec::new());
        assert_eq!(settings.server(), DEFAULT_SERVER);
        assert_eq!(settings.server(), "GVIM");
    }

    #[test]
    fn server_override_wins() {
        let settings = Settings::resolve(Config::default(), Some("MYVIM".into()), Vec::new());
        assert_eq!(settings.server(), "MYVIM");
    }

    #[test]
    fn blank_server_override_is_ignored() {
        let settings = Settings::resolve(Config::default(), Some("  ".into()), Vec::new());
        assert_eq!(settings.server(), "GVIM");
    }

    #[test]
    fn pipe_dir_falls_back_to_temp() {
        let settings = Settings::resolve(Config::default(), None, Vec::new());
        assert_eq!(settings.pipe_dir, std::env::temp_dir());
    }
}
