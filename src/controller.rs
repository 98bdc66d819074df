//! One debugging session from start to finish.

use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::config::Settings;
use crate::editor::{EditorChannel, EditorClient, EditorCommand, EditorEndpoint, EditorPipe};
use crate::error::SessionError;
use crate::filters::{spawn_filter, FilterExit, FilterKind, InputRelay, OutputFilter, PipeRelay};
use crate::protocol::OutputParser;
use crate::pty::{exit_code, DebuggerSession, InputPump, ResizeWatcher};
use crate::shutdown::ShutdownCoordinator;

/// How long the output filter may keep draining after gdb exits.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// The user's side of a session.
pub struct Terminal {
    /// Keys typed by the user. Must be pollable.
    pub input: File,
    /// Where gdb's (annotated) output goes.
    pub output: Box<dyn Write + Send>,
    /// Where filters that die early are reported.
    pub diagnostics: Box<dyn Write + Send>,
}

impl Terminal {
    /// The process's own stdin, stdout and stderr.
    pub fn stdio() -> io::Result<Self> {
        Ok(Self {
            input: stdin_dup()?,
            output: Box::new(io::stdout()),
            diagnostics: Box::new(io::stderr()),
        })
    }
}

/// Run a session on the process's own terminal and return gdb's exit code.
pub async fn run(settings: Settings, channel: Arc<dyn EditorChannel>) -> Result<i32, SessionError> {
    run_on(Terminal::stdio()?, settings, channel).await
}

/// Run a session on `terminal` and return gdb's exit code.
///
/// Startup failures abort before any filter is running. After that the
/// session only ends when gdb exits.
pub async fn run_on(
    terminal: Terminal,
    settings: Settings,
    channel: Arc<dyn EditorChannel>,
) -> Result<i32, SessionError> {
    let Terminal {
        input: keys,
        output,
        mut diagnostics,
    } = terminal;
    let parser = OutputParser::new(&settings.parser)?;
    let cwd = std::env::current_dir().map_err(SessionError::WorkingDir)?;

    let (mut session, pty_io) = DebuggerSession::open(&settings.debugger, &settings.debugger_args)?;
    let mut pipe = EditorPipe::create(&settings.pipe_dir)?;
    let endpoint = EditorEndpoint {
        server: settings.server().to_string(),
        pipe: pipe.path().to_path_buf(),
        cwd,
    };

    let editor = EditorClient::new(channel, &settings.editor);
    let coordinator = ShutdownCoordinator::new();
    let (input, pump) = InputPump::spawn(pty_io.writer)?;
    let (exits_tx, mut exits) = mpsc::unbounded_channel();

    {
        let relay = InputRelay::new(keys, input.clone(), coordinator.handle());
        spawn_filter(FilterKind::Input, exits_tx.clone(), move || relay.run())?;
    }
    {
        let filter = OutputFilter::new(pty_io.reader, output, parser, editor.clone(), input.clone());
        spawn_filter(FilterKind::Output, exits_tx.clone(), move || filter.run())?;
    }
    {
        let relay = PipeRelay::new(endpoint.pipe.clone(), input.clone(), coordinator.handle());
        spawn_filter(FilterKind::EditorInput, exits_tx, move || relay.run())?;
    }

    let resize = match ResizeWatcher::start(session.master()) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            tracing::warn!(error = %err, "terminal resize forwarding disabled");
            None
        }
    };
    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;

    send_to_editor(&editor, endpoint.init_command()).await;
    if settings.debugger.set_prompt {
        if let Err(err) = input.send(endpoint.prompt_command()) {
            tracing::warn!(error = %err, "could not queue prompt command");
        }
    }
    drop(input);

    let mut killer = Some(session.killer());
    let mut wait = tokio::task::spawn_blocking(move || {
        let status = session.wait();
        (session, status)
    });

    let (session, status) = loop {
        tokio::select! {
            joined = &mut wait => {
                break joined.map_err(|e| io::Error::other(e.to_string()))?;
            }
            Some(exit) = exits.recv() => {
                report_early_exit(&exit, &mut diagnostics);
            }
            _ = terminate.recv() => kill_debugger(&mut killer, "SIGTERM"),
            _ = hangup.recv() => kill_debugger(&mut killer, "SIGHUP"),
        }
    };
    let code = match status {
        Ok(status) => exit_code(&status),
        Err(err) => {
            tracing::warn!(error = %err, "waiting for debugger failed");
            1
        }
    };
    tracing::info!(code, "debugger exited");

    coordinator.signal();
    if let Some(watcher) = resize {
        watcher.stop();
    }
    drain_filters(&mut exits).await;
    drop(session);
    if !pump.is_finished() {
        tracing::debug!("debugger input pump still has writers");
    }

    send_to_editor(&editor, EditorCommand::Deinit).await;

    if let Err(err) = pipe.remove() {
        tracing::warn!(error = %err, "failed to remove editor pipe");
    }
    tracing::info!("session finished");
    Ok(code)
}

/// Collect filter exits until all three are in or the grace period ends.
async fn drain_filters(exits: &mut mpsc::UnboundedReceiver<FilterExit>) {
    let deadline = tokio::time::Instant::now() + DRAIN_GRACE;
    loop {
        match tokio::time::timeout_at(deadline, exits.recv()).await {
            Ok(Some(exit)) => tracing::debug!(filter = %exit.kind, end = %exit.end, "filter done"),
            Ok(None) => return,
            Err(_) => {
                tracing::debug!("filters still running after grace period");
                return;
            }
        }
    }
}

fn report_early_exit(exit: &FilterExit, diagnostics: &mut dyn Write) {
    if !exit.is_unexpected() {
        tracing::debug!(filter = %exit.kind, end = %exit.end, "filter done");
        return;
    }
    tracing::warn!(filter = %exit.kind, end = %exit.end, "filter ended before debugger");
    let _ = write!(diagnostics, "\r\n{} {}\r\n", exit.kind, exit.end);
    let _ = diagnostics.flush();
}

fn kill_debugger(
    killer: &mut Option<Box<dyn portable_pty::ChildKiller + Send + Sync>>,
    reason: &str,
) {
    let Some(mut killer) = killer.take() else {
        return;
    };
    tracing::info!(signal = reason, "terminating debugger");
    if let Err(err) = killer.kill() {
        tracing::warn!(error = %err, "failed to kill debugger");
    }
}

async fn send_to_editor(editor: &EditorClient, command: EditorCommand) {
    let editor = editor.clone();
    let result = tokio::task::spawn_blocking(move || editor.send(&command)).await;
    match result {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::warn!(error = %err, "editor handshake failed"),
        Err(err) => tracing::warn!(error = %err, "editor handshake task failed"),
    }
}

/// A private stdin descriptor for the input relay.
fn stdin_dup() -> io::Result<File> {
    use std::os::unix::io::FromRawFd;

    let fd = unsafe { libc::dup(libc::STDIN_FILENO) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    unsafe {
        libc::fcntl(fd, libc::F_SETFD, libc::FD_CLOEXEC);
    }
    Ok(unsafe { File::from_raw_fd(fd) })
}
