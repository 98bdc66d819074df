use clap::{CommandFactory, Parser};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, IsTerminal, Write};
use std::process::Command;
use std::sync::Arc;

use vimgdb::banner::write_banner;
use vimgdb::cli::Cli;
use vimgdb::config::{Config, Settings};
use vimgdb::editor::RemoteSend;
use vimgdb::logging::init_tracing;
use vimgdb::{controller, SessionError};

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.help {
        print_help(&config.debugger.program)?;
        return Ok(0);
    }
    let settings = Settings::resolve(config, cli.server, cli.debugger_args);

    if !io::stdin().is_terminal() {
        return Err(SessionError::NotATerminal.into());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let raw_mode = RawModeGuard::new()?;
    if !cli.no_banner {
        write_banner(&mut io::stdout(), settings.server())?;
    }

    let channel = Arc::new(RemoteSend::from_config(&settings.editor));
    let result = runtime.block_on(controller::run(settings, channel));
    drop(raw_mode);
    // Filter threads may still be parked in a read; don't wait for them.
    runtime.shutdown_background();

    Ok(result?)
}

/// Our own usage, then the debugger's.
fn print_help(debugger: &str) -> io::Result<()> {
    Cli::command().print_help()?;
    println!();
    io::stdout().flush()?;
    if let Err(err) = Command::new(debugger).arg("--help").status() {
        eprintln!("Could not run '{} --help': {}", debugger, err);
    }
    Ok(())
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            default_hook(info);
        }));
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
