//! Shared session: the stream halves, the observable state, and the info sink.
//!
//! A `Session` is shared (`Arc`) between the caller's task and the reader
//! task. Outbound writes are serialized by one async mutex around the write
//! half; the connection state and current channel live in a `watch` channel
//! so waiters are woken on change instead of polling.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use slirc_proto::{Command, LineCodec};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::{Mutex, watch};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, trace};

use super::state::{ConnectionState, Transition};
use crate::error::ClientError;
use crate::info::InfoSink;

/// Channel sentinel meaning "no channel selected".
pub const DEFAULT_CHANNEL: &str = "none";

type LineReader = FramedRead<Box<dyn AsyncRead + Send + Unpin>, LineCodec>;
type LineWriter = FramedWrite<Box<dyn AsyncWrite + Send + Unpin>, LineCodec>;

/// Snapshot of the observable session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub state: ConnectionState,
    pub current_channel: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            state: ConnectionState::default(),
            current_channel: DEFAULT_CHANNEL.to_string(),
        }
    }
}

/// Result of one read attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Incoming {
    /// A complete line, terminator stripped. May be empty.
    Line(String),
    /// No complete line arrived within the timeout.
    Timeout,
    /// The peer closed the stream.
    Closed,
}

/// State shared between the caller and the reader task.
pub struct Session {
    name: String,
    nickname: String,
    reader: Mutex<Option<LineReader>>,
    writer: Mutex<Option<LineWriter>>,
    state: watch::Sender<SessionState>,
    info: InfoSink,
}

impl Session {
    pub fn new(name: impl Into<String>, nickname: impl Into<String>, info: InfoSink) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            name: name.into(),
            nickname: nickname.into(),
            reader: Mutex::new(None),
            writer: Mutex::new(None),
            state,
            info,
        }
    }

    /// Server label this session was configured under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn info_sink(&self) -> &InfoSink {
        &self.info
    }

    pub fn info(&self, text: &str) {
        self.info.info(text);
    }

    pub fn error(&self, text: &str) {
        self.info.error(text);
    }

    // ------------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state.borrow().state
    }

    pub fn current_channel(&self) -> String {
        self.state.borrow().current_channel.clone()
    }

    pub fn set_current_channel(&self, channel: &str) {
        self.state.send_if_modified(|s| {
            if s.current_channel == channel {
                return false;
            }
            s.current_channel = channel.to_string();
            true
        });
    }

    /// Apply a state transition, notifying waiters on success.
    pub fn transition(&self, event: Transition) -> Result<ConnectionState, ClientError> {
        let mut result = Err(ClientError::NotConnected);
        self.state.send_if_modified(|s| match s.state.apply(event) {
            Ok(next) => {
                let changed = next != s.state;
                s.state = next;
                result = Ok(next);
                changed
            }
            Err(e) => {
                result = Err(e);
                false
            }
        });
        if let Err(e) = &result {
            debug!(server = %self.name, error = %e, "Rejected state transition");
        }
        result
    }

    /// Wait until `predicate` holds for the session state or `timeout` elapses.
    ///
    /// Returns immediately when the predicate already holds.
    pub async fn wait_for<F>(&self, predicate: F, timeout: Duration) -> bool
    where
        F: FnMut(&SessionState) -> bool,
    {
        let mut rx = self.state.subscribe();
        matches!(
            tokio::time::timeout(timeout, rx.wait_for(predicate)).await,
            Ok(Ok(_))
        )
    }

    // ------------------------------------------------------------------------
    // Stream halves
    // ------------------------------------------------------------------------

    /// Install freshly connected stream halves.
    pub async fn attach<R, W>(&self, reader: R, writer: W)
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let reader: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        let writer: Box<dyn AsyncWrite + Send + Unpin> = Box::new(writer);
        *self.reader.lock().await = Some(FramedRead::new(reader, LineCodec::new()));
        *self.writer.lock().await = Some(FramedWrite::new(writer, LineCodec::new()));
    }

    /// Flush and drop both stream halves.
    pub async fn close(&self) {
        if let Some(mut writer) = self.writer.lock().await.take() {
            if let Err(e) = SinkExt::<&str>::close(&mut writer).await {
                debug!(server = %self.name, error = %e, "Error closing writer");
            }
        }
        self.reader.lock().await.take();
    }

    /// Read one line, waiting at most `timeout`.
    ///
    /// Partial input received before a timeout is kept for the next call.
    pub async fn read_message(&self, timeout: Duration) -> Result<Incoming, ClientError> {
        let mut guard = self.reader.lock().await;
        let reader = guard.as_mut().ok_or(ClientError::NotConnected)?;

        match tokio::time::timeout(timeout, reader.next()).await {
            Ok(Some(Ok(line))) => {
                trace!(server = %self.name, line = %line, "←");
                Ok(Incoming::Line(line))
            }
            Ok(Some(Err(e))) => Err(e.into()),
            Ok(None) => Ok(Incoming::Closed),
            Err(_) => {
                trace!(server = %self.name, timeout_ms = timeout.as_millis() as u64, "Read timed out");
                Ok(Incoming::Timeout)
            }
        }
    }

    /// Write `lines` back to back under one lock, then flush.
    ///
    /// Dropped silently when no stream is attached.
    pub async fn send_lines<I, S>(&self, lines: I) -> Result<(), ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = self.writer.lock().await;
        let Some(writer) = guard.as_mut() else {
            debug!(server = %self.name, "Dropping send while disconnected");
            return Ok(());
        };
        for line in lines {
            let line = line.as_ref();
            trace!(server = %self.name, line = %line, "→");
            writer.feed(line).await?;
        }
        SinkExt::<&str>::flush(writer).await?;
        Ok(())
    }

    /// Append CRLF to `line` and write it.
    pub async fn send_raw(&self, line: &str) -> Result<(), ClientError> {
        self.send_lines([line]).await
    }

    pub async fn send(&self, command: &Command) -> Result<(), ClientError> {
        self.send_raw(&command.to_string()).await
    }

    /// Send `COMMAND arg1 arg2 ... :content`.
    pub async fn send_command<S: AsRef<str>>(
        &self,
        command: &str,
        args: &[S],
        content: &str,
    ) -> Result<(), ClientError> {
        self.send_raw(&slirc_proto::command::encode(command, args, content))
            .await
    }

    /// PRIVMSG `text` to the current channel.
    pub async fn send_message(&self, text: &str) -> Result<(), ClientError> {
        let target = message_target(&self.current_channel());
        self.send(&Command::privmsg(target.as_deref(), text)).await
    }
}

/// PRIVMSG target for a stored channel; `None` for the sentinel.
pub(crate) fn message_target(channel: &str) -> Option<String> {
    if channel == DEFAULT_CHANNEL || channel.is_empty() {
        None
    } else if channel.starts_with(['#', '&']) {
        Some(channel.to_string())
    } else {
        Some(format!("#{channel}"))
    }
}
