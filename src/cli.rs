use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Command-line surface of the `vimgdb` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vimgdb",
    version,
    about = "Run gdb linked to a Vim server",
    disable_help_flag = true,
    after_help = "All other arguments are passed to gdb unchanged. gdb's own options follow."
)]
pub struct Cli {
    /// Print help, followed by gdb's own help
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// The Vim server to connect to (see `gvim --serverlist`)
    #[arg(long, value_name = "SERVER")]
    pub server: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Don't print the welcome banner
    #[arg(long)]
    pub no_banner: bool,

    /// Arguments for gdb
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "GDB ARGS")]
    pub debugger_args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments() {
        let cli = Cli::try_parse_from(["vimgdb"]).unwrap();
        assert!(cli.server.is_none());
        assert!(cli.debugger_args.is_empty());
        assert!(!cli.no_banner);
        assert!(!cli.help);
    }

    #[test]
    fn help_is_a_flag_not_an_exit() {
        let cli = Cli::try_parse_from(["vimgdb", "--help"]).unwrap();
        assert!(cli.help);
        let cli = Cli::try_parse_from(["vimgdb", "-h"]).unwrap();
        assert!(cli.help);
    }

    #[test]
    fn help_after_gdb_args_belongs_to_gdb() {
        let cli = Cli::try_parse_from(["vimgdb", "./a.out", "--help"]).unwrap();
        assert!(!cli.help);
        assert_eq!(cli.debugger_args, vec!["./a.out", "--help"]);
    }

    #[test]
    fn server_with_equals() {
        let cli = Cli::try_parse_from(["vimgdb", "--server=MYVIM", "./a.out"]).unwrap();
        assert_eq!(cli.server.as_deref(), Some("MYVIM"));
        assert_eq!(cli.debugger_args, vec!["./a.out"]);
    }

    #[test]
    fn gdb_flags_pass_through() {
        let cli = Cli::try_parse_from(["vimgdb", "--server", "X", "-q", "--args", "prog", "-v"])
            .unwrap();
        assert_eq!(cli.server.as_deref(), Some("X"));
        assert_eq!(cli.debugger_args, vec!["-q", "--args", "prog", "-v"]);
    }

    #[test]
    fn double_dash_separates_gdb_args() {
        let cli = Cli::try_parse_from(["vimgdb", "--no-banner", "--", "--server=gdbs"]).unwrap();
        assert!(cli.no_banner);
        assert!(cli.server.is_none());
        assert_eq!(cli.debugger_args, vec!["--server=gdbs"]);
    }
}
