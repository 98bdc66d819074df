mod common;

use common::temp_config;
use vimgdb::config::{Config, ConfigError, Settings, DEFAULT_SERVER, MIN_LINE_LIMIT};

/// Config::default() matches the documented defaults.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.editor.program, "gvim");
    assert_eq!(config.editor.server, "GVIM");
    assert_eq!(config.editor.command_prefix, "<C-\\><C-N>");
    assert!(config.editor.command_suffix.is_empty());

    assert_eq!(config.debugger.program, "gdb");
    assert_eq!(config.debugger.args, vec!["-f"]);
    assert!(config.debugger.set_prompt);

    assert_eq!(config.parser.line_limit, 1000);
    assert_eq!(config.parser.context_lines, 10);
    assert_eq!(config.parser.highlight, "\x1b[1;44m");

    assert!(config.pipe.dir.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("vimgdb/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config(
        r#"
[editor]
server = "WORK"

[parser]
context_lines = 5
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.editor.server, "WORK");
    assert_eq!(config.editor.program, "gvim");
    assert_eq!(config.parser.context_lines, 5);
    assert_eq!(config.parser.line_limit, 1000);
}

#[test]
fn test_pipe_dir_is_read() {
    let (_dir, path) = temp_config("[pipe]\ndir = \"/var/tmp\"\n");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.pipe.dir.as_deref(), Some(std::path::Path::new("/var/tmp")));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[editor\nserver = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_small_line_limit_is_rejected() {
    let (_dir, path) = temp_config(&format!("[parser]\nline_limit = {}\n", MIN_LINE_LIMIT - 1));
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("line_limit"));
}

#[test]
fn test_blank_programs_are_rejected() {
    for content in [
        "[editor]\nprogram = \"\"\n",
        "[editor]\nserver = \"  \"\n",
        "[debugger]\nprogram = \"\"\n",
    ] {
        let (_dir, path) = temp_config(content);
        assert!(
            matches!(Config::load_from(&path), Err(ConfigError::ValidationError { .. })),
            "accepted {:?}",
            content
        );
    }
}

#[test]
fn test_server_defaults_without_flag() {
    let settings = Settings::resolve(Config::default(), None, Vec::new());
    assert_eq!(settings.server(), DEFAULT_SERVER);
}

#[test]
fn test_server_flag_overrides_config() {
    let settings = Settings::resolve(Config::default(), Some("MINE".into()), vec!["a.out".into()]);
    assert_eq!(settings.server(), "MINE");
    assert_eq!(settings.debugger_args, vec!["a.out"]);
}
