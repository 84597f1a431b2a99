//! FIFO transport for POSIX systems.
//!
//! A writer closing the FIFO ends the reader's stream, so the reader reopens
//! the same path after every end-of-stream. One reader exists at a time and
//! read sessions never overlap.

use super::{channel_name, deliver, RecordSender, SelectionChannel};
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::net::unix::pipe;
use tokio::task::JoinHandle;

/// Names tried before giving up on the channel.
pub const MAX_CREATE_ATTEMPTS: usize = 10;

/// Pause after an end-of-stream that carried no data.
const EMPTY_SESSION_BACKOFF: Duration = Duration::from_millis(50);

const READ_CHUNK: usize = 4096;

pub struct FifoChannel {
    path: PathBuf,
    address: String,
    reader: Option<JoinHandle<()>>,
}

impl FifoChannel {
    /// Create `fzf-pipe-<pid>[-<n>]` inside `dir` and start reading it.
    ///
    /// Must be called from within a tokio runtime. Returns `None` after
    /// [`MAX_CREATE_ATTEMPTS`] failed names.
    pub fn create_in(dir: &Path, pid: u32, records: RecordSender) -> Option<Self> {
        for attempt in 0..MAX_CREATE_ATTEMPTS {
            let path = dir.join(channel_name(pid, attempt));

            if let Err(e) = mkfifo(&path, Mode::S_IRUSR | Mode::S_IWUSR) {
                log::debug!("Cannot create fifo {}: {e}", path.display());
                continue;
            }

            let receiver = match pipe::OpenOptions::new().open_receiver(&path) {
                Ok(receiver) => receiver,
                Err(e) => {
                    log::debug!("Cannot open fifo {}: {e}", path.display());
                    if let Err(e) = std::fs::remove_file(&path) {
                        log::debug!("Cannot remove fifo {}: {e}", path.display());
                    }
                    continue;
                }
            };

            log::info!("Listening for selections on {}", path.display());
            let reader = FifoReader {
                path: path.clone(),
                records,
            };
            let handle = tokio::spawn(reader.run(receiver));

            return Some(Self {
                address: path.to_string_lossy().into_owned(),
                path,
                reader: Some(handle),
            });
        }

        log::warn!("Giving up on the selection fifo after {MAX_CREATE_ATTEMPTS} attempts");
        None
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionChannel for FifoChannel {
    fn address(&self) -> &str {
        &self.address
    }

    fn close(&mut self) {
        let Some(reader) = self.reader.take() else {
            return;
        };
        reader.abort();

        match std::fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Removed fifo {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => log::warn!("Cannot remove fifo {}: {e}", self.path.display()),
        }
    }
}

impl Drop for FifoChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Reader states. `Draining` holds the bytes of a finished read session.
enum ReaderState {
    Idle,
    Open(pipe::Receiver),
    Draining(Vec<u8>),
}

struct FifoReader {
    path: PathBuf,
    records: RecordSender,
}

impl FifoReader {
    async fn run(self, receiver: pipe::Receiver) {
        let mut state = ReaderState::Open(receiver);

        loop {
            state = match state {
                ReaderState::Idle => match pipe::OpenOptions::new().open_receiver(&self.path) {
                    Ok(receiver) => ReaderState::Open(receiver),
                    Err(e) => {
                        log::warn!("Cannot reopen fifo {}: {e}", self.path.display());
                        return;
                    }
                },
                ReaderState::Open(receiver) => match read_session(&receiver).await {
                    Ok(payload) => ReaderState::Draining(payload),
                    Err(e) => {
                        log::warn!("Reading fifo {} failed: {e}", self.path.display());
                        return;
                    }
                },
                ReaderState::Draining(payload) => {
                    if payload.is_empty() {
                        tokio::time::sleep(EMPTY_SESSION_BACKOFF).await;
                    } else if !deliver(&payload, &self.records) {
                        log::debug!("Session gone, stopping fifo reader");
                        return;
                    }
                    ReaderState::Idle
                }
            };
        }
    }
}

/// Read until the writer closes its end.
async fn read_session(receiver: &pipe::Receiver) -> std::io::Result<Vec<u8>> {
    let mut payload = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        receiver.readable().await?;
        match receiver.try_read(&mut chunk) {
            Ok(0) => return Ok(payload),
            Ok(n) => payload.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::WouldBlock => continue,
            Err(e) => return Err(e),
        }
    }
}
