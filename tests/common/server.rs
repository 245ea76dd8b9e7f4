//! Fake IRC server.
//!
//! Binds `127.0.0.1:0`, accepts one client and lets the test script both
//! directions line by line.

use slirc_client::config::{ClientSettings, ServerConfig};
use slirc_client::network::Connection;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Default wait for anything the test expects to happen.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings with short timeouts so stop and join waits stay quick.
pub fn fast_settings() -> ClientSettings {
    ClientSettings {
        read_timeout_ms: 50,
        connect_timeout_ms: 2000,
        join_timeout_ms: 500,
        ..ClientSettings::default()
    }
}

/// A listening fake server.
pub struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    /// Bind to an ephemeral port on localhost.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// A server record pointing at this listener.
    pub fn server_config(&self, username: &str, nickname: &str) -> ServerConfig {
        ServerConfig::new("local", "127.0.0.1", self.port(), username, nickname)
    }

    /// Accept the next client.
    pub async fn accept(&self) -> anyhow::Result<Peer> {
        let (stream, _) = timeout(RECV_TIMEOUT, self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(Peer {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }

    /// Connect `conn` to this server and drain its registration lines.
    pub async fn connect(&self, conn: &mut Connection) -> anyhow::Result<(Peer, Vec<String>)> {
        let (connected, peer) = tokio::join!(conn.connect(), self.accept());
        connected?;
        let mut peer = peer?;
        let registration = peer.recv_registration().await?;
        Ok((peer, registration))
    }
}

/// The server side of one accepted client.
pub struct Peer {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Peer {
    /// Send one line; CRLF is appended.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Send bytes exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line, terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        match self.recv_timeout(RECV_TIMEOUT).await? {
            Some(line) => Ok(line),
            None => anyhow::bail!("no line within {RECV_TIMEOUT:?}"),
        }
    }

    /// Receive one line, or `None` if nothing arrives within `dur`.
    ///
    /// End of stream is an error.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        match timeout(dur, self.reader.read_line(&mut line)).await {
            Err(_) => Ok(None),
            Ok(Ok(0)) => anyhow::bail!("client closed the connection"),
            Ok(Ok(_)) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Ok(Err(e)) => Err(e.into()),
        }
    }

    /// Whether the client closes its side within `dur`, ignoring any
    /// lines still in flight.
    pub async fn closed_within(&mut self, dur: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + dur;
        loop {
            let mut line = String::new();
            match tokio::time::timeout_at(deadline, self.reader.read_line(&mut line)).await {
                Ok(Ok(0)) | Ok(Err(_)) => return true,
                Ok(Ok(_)) => continue,
                Err(_) => return false,
            }
        }
    }

    /// Read lines up to and including `USER`.
    pub async fn recv_registration(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = line.starts_with("USER ");
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }
}

/// Collects info strings from a connection's hook.
pub struct InfoLog {
    rx: mpsc::UnboundedReceiver<String>,
}

impl InfoLog {
    /// Subscribe to `conn`'s info hook.
    pub fn attach(conn: &Connection) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        conn.set_on_info(move |text| {
            let _ = tx.send(text.to_string());
        });
        Self { rx }
    }

    /// Wait for an info string satisfying `predicate`, skipping others.
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Option<String>
    where
        F: FnMut(&str) -> bool,
    {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(text)) if predicate(&text) => return Some(text),
                Ok(Some(_)) => continue,
                Ok(None) | Err(_) => return None,
            }
        }
    }
}
