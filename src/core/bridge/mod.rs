//! Selection bridge: the channel the forwarding script writes selections to.
//!
//! The bridge owns one OS channel per process and turns every payload written
//! into it into [`SelectionRecord`]s delivered on a [`RecordSender`]:
//!
//! ```text
//! forwarder ── write/close ──▶ channel ──▶ reader task ──▶ RecordSender ──▶ session
//! ```
//!
//! # Transports
//! - **POSIX** ([`fifo::FifoChannel`]): a FIFO in the temp directory, reopened
//!   for a fresh non-blocking read every time a writer closes it
//! - **Windows** ([`named_pipe::NamedPipeChannel`]): a named pipe server that
//!   spawns a new instance for every connecting client
//!
//! Callers only see the [`SelectionChannel`] capability returned by
//! [`open_channel`].

#[cfg(unix)]
pub mod fifo;
#[cfg(windows)]
pub mod named_pipe;

use crate::core::error::Result;
use crate::core::record::SelectionRecord;
use tokio::sync::mpsc;

/// Where parsed records are delivered.
pub type RecordSender = mpsc::UnboundedSender<SelectionRecord>;
pub type RecordReceiver = mpsc::UnboundedReceiver<SelectionRecord>;

/// Prefix of every channel name.
pub const CHANNEL_PREFIX: &str = "fzf-pipe";

/// An open selection channel.
pub trait SelectionChannel: Send {
    /// Address handed to the forwarding script.
    fn address(&self) -> &str;

    /// Stop reading and release the channel. Calling it twice is harmless.
    fn close(&mut self);
}

/// Channel name for a process, suffixed with the attempt number after the first.
pub fn channel_name(pid: u32, attempt: usize) -> String {
    if attempt == 0 {
        format!("{CHANNEL_PREFIX}-{pid}")
    } else {
        format!("{CHANNEL_PREFIX}-{pid}-{attempt}")
    }
}

pub fn record_channel() -> (RecordSender, RecordReceiver) {
    mpsc::unbounded_channel()
}

/// Open the platform channel for this process.
///
/// `Ok(None)` means the FIFO could not be created; pipelines can still be
/// composed but selections will not come back.
#[cfg(unix)]
pub fn open_channel(records: RecordSender) -> Result<Option<Box<dyn SelectionChannel>>> {
    let dir = crate::core::dirs::get_channel_directory();
    let channel = fifo::FifoChannel::create_in(&dir, std::process::id(), records);
    Ok(channel.map(|channel| Box::new(channel) as Box<dyn SelectionChannel>))
}

/// Open the platform channel for this process.
#[cfg(windows)]
pub fn open_channel(records: RecordSender) -> Result<Option<Box<dyn SelectionChannel>>> {
    let channel = named_pipe::NamedPipeChannel::bind(std::process::id(), records)?;
    Ok(Some(Box::new(channel) as Box<dyn SelectionChannel>))
}

/// Decode one read session's bytes into records.
///
/// Each non-blank line is a record; invalid UTF-8 drops the whole payload.
pub fn records_from_payload(payload: &[u8]) -> Vec<SelectionRecord> {
    let text = match std::str::from_utf8(payload) {
        Ok(text) => text,
        Err(e) => {
            log::debug!("Dropping selection payload: {e}");
            return Vec::new();
        }
    };

    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(SelectionRecord::parse)
        .collect()
}

/// Forward a payload's records. Returns `false` once the session is gone.
pub(crate) fn deliver(payload: &[u8], records: &RecordSender) -> bool {
    for record in records_from_payload(payload) {
        log::debug!("Received selection: {}", record.to_line());
        if records.send(record).is_err() {
            return false;
        }
    }
    !records.is_closed()
}
