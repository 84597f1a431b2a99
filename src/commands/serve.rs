//! `fzf-quick-open serve`: run one session for an editor plugin.
//!
//! The session owns the selection channel and talks to the plugin over
//! stdin/stdout (see [`super::stdio_host`]). Everything happens on a single
//! thread: selection records, plugin messages and shutdown signals are
//! multiplexed in one loop, so the session is never touched concurrently.

use crate::commands::stdio_host::{HostMessage, StdioHost};
use crate::core::bridge::{open_channel, record_channel};
use crate::core::config::Settings;
use crate::core::error::Result;
use crate::core::host::TerminalKind;
use crate::core::session::Session;
use crate::core::session_config::Platform;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const STDIN_SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Whether the loop keeps running after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub fn execute_serve(settings_path: Option<PathBuf>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(serve(settings_path));

    // The blocking stdin read behind tokio's stdin cannot be cancelled
    runtime.shutdown_timeout(STDIN_SHUTDOWN_GRACE);
    result
}

async fn serve(settings_path: Option<PathBuf>) -> Result<()> {
    let settings = Settings::from_cli(settings_path.as_deref())?;

    let (records, mut incoming) = record_channel();
    let channel = open_channel(records)?;

    let mut session = Session::new(
        StdioHost::new(std::io::stdout()),
        settings,
        Platform::current(),
        channel,
    );
    let address = session.channel_address().map(str::to_string);
    session.host_mut().announce_ready(address.as_deref())?;

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut pending = Vec::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(record) = incoming.recv() => {
                if let Err(e) = session.handle_record(&record) {
                    log::warn!("Handling selection {} failed: {e}", record.to_line());
                }
            }
            read = stdin.read_until(b'\n', &mut pending) => {
                if read? == 0 {
                    log::debug!("Editor closed stdin");
                    break;
                }
                let Some(line) = decode_line(std::mem::take(&mut pending)) else {
                    continue;
                };
                match handle_line(&mut session, &line, settings_path.as_deref()) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Stop) => break,
                    Err(e) => log::warn!("{e}"),
                }
            }
            _ = &mut shutdown => {
                log::debug!("Shutdown signal received");
                break;
            }
        }
    }

    session.shutdown();
    Ok(())
}

/// Decode one raw stdin line. Lines that are not UTF-8 are logged and skipped.
pub fn decode_line(raw: Vec<u8>) -> Option<String> {
    match String::from_utf8(raw) {
        Ok(line) => Some(line),
        Err(e) => {
            log::warn!("Skipping host message that is not UTF-8: {e}");
            None
        }
    }
}

/// Parse and handle one line from the plugin. Blank lines are ignored.
pub fn handle_line<W: Write>(
    session: &mut Session<StdioHost<W>>,
    line: &str,
    settings_path: Option<&Path>,
) -> Result<Flow> {
    if line.trim().is_empty() {
        return Ok(Flow::Continue);
    }
    let message = HostMessage::parse(line)?;
    handle_message(session, message, settings_path)
}

pub fn handle_message<W: Write>(
    session: &mut Session<StdioHost<W>>,
    message: HostMessage,
    settings_path: Option<&Path>,
) -> Result<Flow> {
    session.host_mut().observe(&message);

    match message {
        HostMessage::RunFzfFile { pwd } => session.run_file_open(TerminalKind::from_pwd(pwd))?,
        HostMessage::RunFzfAddWorkspaceFolder { pwd } => {
            session.run_folder_add(TerminalKind::from_pwd(pwd))?
        }
        HostMessage::RunFzfSearch { pwd, pattern } => {
            session.host_mut().set_pending_pattern(pattern);
            session.run_search(TerminalKind::from_pwd(pwd))?;
        }
        HostMessage::TerminalClosed { name } => session.terminal_closed(&name),
        HostMessage::WorkspaceFolders { .. } => session.refresh(),
        HostMessage::ConfigurationChanged { settings } => {
            let settings = match settings {
                Some(settings) => settings,
                None => Settings::from_cli(settings_path)?,
            };
            session.apply_settings(settings);
        }
        HostMessage::Shutdown => return Ok(Flow::Stop),
        HostMessage::TerminalOpened { .. }
        | HostMessage::ActiveTerminal { .. }
        | HostMessage::ActiveEditor { .. } => {}
    }

    Ok(Flow::Continue)
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = interrupt => {}
        _ = terminate_signal() => {}
    }
}

#[cfg(unix)]
async fn terminate_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            terminate.recv().await;
        }
        Err(e) => {
            log::warn!("Cannot listen for SIGTERM: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_signal() {
    std::future::pending::<()>().await
}
