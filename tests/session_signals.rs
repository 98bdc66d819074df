//! Termination signals during a session.
//!
//! Kept in its own test binary: the signal is sent to the whole process.

mod common;

use std::time::Duration;

use common::{captured_terminal, idle_keys, RecordingChannel};
use vimgdb::config::{Config, Settings};
use vimgdb::controller;

#[tokio::test(flavor = "multi_thread")]
async fn sigterm_kills_debugger_and_still_deinits_editor() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = Config::default();
    config.debugger.program = "sh".to_string();
    config.debugger.args = vec!["-c".to_string(), "exec sleep 30".to_string()];
    config.debugger.set_prompt = false;
    let mut settings = Settings::resolve(config, None, Vec::new());
    settings.pipe_dir = dir.path().to_path_buf();

    let (keys, _keep_open) = idle_keys();
    let captured = captured_terminal(keys);
    let channel = RecordingChannel::new();

    let stop = async {
        // Signal handlers are installed before the editor is initialised.
        while !channel
            .sent()
            .iter()
            .any(|keys| keys.contains("Gdb_Interface_Init("))
        {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        unsafe {
            libc::kill(libc::getpid(), libc::SIGTERM);
        }
    };
    let session = async {
        let (result, ()) = tokio::join!(
            controller::run_on(captured.terminal, settings, channel.clone()),
            stop
        );
        result
    };

    let code = tokio::time::timeout(Duration::from_secs(10), session)
        .await
        .expect("session should end after SIGTERM")
        .unwrap();
    assert_ne!(code, 0);
    assert_eq!(
        channel.sent().last().map(String::as_str),
        Some("<C-\\><C-N>:call Gdb_Interface_Deinit()<CR>")
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
