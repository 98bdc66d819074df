use std::fmt::Write as _;
use std::path::PathBuf;

/// A command the bridge issues to the editor plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Tell the plugin where to write commands for gdb.
    Init { pipe: PathBuf, cwd: PathBuf },
    Deinit,
    Breakpoint { id: String, file: String, line: String },
    ClearBreakpoint { id: String },
    DebugStop { file: String, line: u32 },
}

impl EditorCommand {
    /// Render the Ex command body, e.g. `:call Gdb_ClearBreakpoint(2)<CR>`.
    ///
    /// The result is a `--remote-send` key sequence: `<` is sent as
    /// `<lt>` and quoted arguments have `'` doubled, so paths can't
    /// smuggle keystrokes or break out of the string.
    pub fn render(&self) -> String {
        let mut body = String::with_capacity(64);
        match self {
            EditorCommand::Init { pipe, cwd } => {
                let _ = write!(
                    body,
                    ":call Gdb_Interface_Init({},{})",
                    quoted(&pipe.to_string_lossy()),
                    quoted(&cwd.to_string_lossy()),
                );
            }
            EditorCommand::Deinit => body.push_str(":call Gdb_Interface_Deinit()"),
            EditorCommand::Breakpoint { id, file, line } => {
                let _ = write!(
                    body,
                    ":call Gdb_Breakpoint({},{},{})",
                    keys(id),
                    quoted(file),
                    keys(line)
                );
            }
            EditorCommand::ClearBreakpoint { id } => {
                let _ = write!(body, ":call Gdb_ClearBreakpoint({})", keys(id));
            }
            EditorCommand::DebugStop { file, line } => {
                let _ = write!(body, ":call Gdb_DebugStop({},{})", quoted(file), line);
            }
        }
        body.push_str("<CR>");
        body
    }
}

/// Single-quoted Vim string literal, escaped for `--remote-send`.
fn quoted(value: &str) -> String {
    format!("'{}'", keys(&value.replace('\'', "''")))
}

/// Escape key notation so the value is typed literally.
fn keys(value: &str) -> String {
    value.replace('<', "<lt>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_quotes_both_paths() {
        let cmd = EditorCommand::Init {
            pipe: PathBuf::from("/tmp/vimgdb.abc123/pipe"),
            cwd: PathBuf::from("/home/me/proj"),
        };
        assert_eq!(
            cmd.render(),
            ":call Gdb_Interface_Init('/tmp/vimgdb.abc123/pipe','/home/me/proj')<CR>"
        );
    }

    #[test]
    fn deinit() {
        assert_eq!(
            EditorCommand::Deinit.render(),
            ":call Gdb_Interface_Deinit()<CR>"
        );
    }

    #[test]
    fn breakpoint() {
        let cmd = EditorCommand::Breakpoint {
            id: "1".into(),
            file: "main.c".into(),
            line: "12".into(),
        };
        assert_eq!(cmd.render(), ":call Gdb_Breakpoint(1,'main.c',12)<CR>");
    }

    #[test]
    fn clear_breakpoint() {
        let cmd = EditorCommand::ClearBreakpoint { id: "2".into() };
        assert_eq!(cmd.render(), ":call Gdb_ClearBreakpoint(2)<CR>");
    }

    #[test]
    fn debug_stop() {
        let cmd = EditorCommand::DebugStop {
            file: "main.c".into(),
            line: 20,
        };
        assert_eq!(cmd.render(), ":call Gdb_DebugStop('main.c',20)<CR>");
    }

    #[test]
    fn hostile_paths_are_escaped() {
        let cmd = EditorCommand::DebugStop {
            file: "it's<CR>:q!.c".into(),
            line: 3,
        };
        assert_eq!(
            cmd.render(),
            ":call Gdb_DebugStop('it''s<lt>CR>:q!.c',3)<CR>"
        );
    }
}
