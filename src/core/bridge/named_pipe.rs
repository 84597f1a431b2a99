//! Named pipe transport for Windows.
//!
//! The first server instance claims the name; every connected client gets its
//! own instance, drained on a separate task, while a fresh instance waits for
//! the next client. The name itself is never recreated. Client tasks belong to
//! the acceptor, so closing the channel stops them too.

use super::{channel_name, deliver, RecordSender, SelectionChannel};
use crate::core::error::{QuickOpenError, Result};
use std::io::ErrorKind;
use tokio::io::AsyncReadExt;
use tokio::net::windows::named_pipe::{NamedPipeServer, ServerOptions};
use tokio::task::{JoinHandle, JoinSet};

const READ_CHUNK: usize = 4096;

pub struct NamedPipeChannel {
    address: String,
    acceptor: Option<JoinHandle<()>>,
}

impl NamedPipeChannel {
    /// Claim `\\.\pipe\fzf-pipe-<pid>[-<n>]`, moving to the next suffix while
    /// the name is taken. Any other error is returned.
    pub fn bind(pid: u32, records: RecordSender) -> Result<Self> {
        let mut attempt = 0;

        loop {
            let address = pipe_address(pid, attempt);
            match ServerOptions::new()
                .first_pipe_instance(true)
                .create(&address)
            {
                Ok(server) => {
                    log::info!("Listening for selections on {address}");
                    let acceptor = tokio::spawn(accept_clients(address.clone(), server, records));
                    return Ok(Self {
                        address,
                        acceptor: Some(acceptor),
                    });
                }
                Err(e) if is_name_in_use(&e) => {
                    log::debug!("Pipe name {address} in use: {e}");
                    attempt += 1;
                }
                Err(e) => return Err(QuickOpenError::channel_setup(address, e)),
            }
        }
    }
}

pub fn pipe_address(pid: u32, attempt: usize) -> String {
    format!(r"\\.\pipe\{}", channel_name(pid, attempt))
}

/// `first_pipe_instance` reports a taken name as access denied.
fn is_name_in_use(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::AddrInUse | ErrorKind::PermissionDenied
    )
}

impl SelectionChannel for NamedPipeChannel {
    fn address(&self) -> &str {
        &self.address
    }

    fn close(&mut self) {
        if let Some(acceptor) = self.acceptor.take() {
            acceptor.abort();
        }
    }
}

impl Drop for NamedPipeChannel {
    fn drop(&mut self) {
        self.close();
    }
}

async fn accept_clients(address: String, mut server: NamedPipeServer, records: RecordSender) {
    let mut clients = JoinSet::new();

    loop {
        if let Err(e) = server.connect().await {
            log::warn!("Accepting on {address} failed: {e}");
            break;
        }

        let connected = server;
        server = match ServerOptions::new().create(&address) {
            Ok(server) => server,
            Err(e) => {
                log::warn!("Cannot create next instance of {address}: {e}");
                break;
            }
        };

        let records = records.clone();
        clients.spawn(async move {
            match read_client(connected).await {
                Ok(payload) => {
                    deliver(&payload, &records);
                }
                Err(e) => log::debug!("Dropping selection client: {e}"),
            }
        });
        while clients.try_join_next().is_some() {}
    }

    // Clients already connected still deliver their selections
    while clients.join_next().await.is_some() {}
}

/// Read until the client disconnects.
async fn read_client(mut client: NamedPipeServer) -> std::io::Result<Vec<u8>> {
    let mut payload = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        match client.read(&mut chunk).await {
            Ok(0) => return Ok(payload),
            Ok(n) => payload.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(payload),
            Err(e) => return Err(e),
        }
    }
}
