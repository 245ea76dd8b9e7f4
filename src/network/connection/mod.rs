//! Connection - one client session to one server.
//!
//! ```text
//! connect()
//!    │  TCP connect (bounded by connect_timeout)
//!    ▼
//! register()  ── CAP LS 302, [PASS], NICK + USER
//!    │
//!    ▼
//! start_listen() ──spawn──▶ Listener task: read → parse → dispatch
//!    │                                            │
//!    │  caller: send_message / send_command       │ PONG, CAP refusal
//!    ▼                                            ▼
//!              Session (single writer mutex, watch<SessionState>)
//! ```
//!
//! `disconnect()` stops the listener, waits for it, closes the socket and
//! returns to `Disconnected`.

mod listener;
mod session;
mod state;

pub use session::{DEFAULT_CHANNEL, Incoming, Session, SessionState};
pub use state::{ConnectionState, Registration, Transition};

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use listener::Listener;
use slirc_proto::Command;
use tokio::net::TcpStream;
use tracing::{debug, info, instrument, warn};

use crate::config::{ClientSettings, ServerConfig};
use crate::error::{ClientError, ConnectFailure, ConnectFailureReason};
use crate::handlers::Dispatcher;
use crate::info::InfoSink;

/// A client connection to one server.
pub struct Connection {
    server: ServerConfig,
    settings: ClientSettings,
    session: Arc<Session>,
    dispatcher: Arc<Dispatcher>,
    listener: Option<Listener>,
}

impl Connection {
    /// Create an idle connection using the default dispatch table.
    pub fn new(server: ServerConfig, settings: ClientSettings) -> Self {
        Self::with_dispatcher(server, settings, Dispatcher::with_defaults())
    }

    /// Create an idle connection with a custom dispatch table.
    pub fn with_dispatcher(
        server: ServerConfig,
        settings: ClientSettings,
        dispatcher: Dispatcher,
    ) -> Self {
        let session = Session::new(
            server.name.clone(),
            server.nickname.clone(),
            InfoSink::new(),
        );
        Self {
            server,
            settings,
            session: Arc::new(session),
            dispatcher: Arc::new(dispatcher),
            listener: None,
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Open the socket, register and start the reader task.
    ///
    /// No retry is attempted. On failure the connection is left
    /// `Disconnected`.
    #[instrument(skip(self), fields(server = %self.server.name, host = %self.server.host, port = self.server.port))]
    pub async fn connect(&mut self) -> Result<(), ConnectFailure> {
        let start = Instant::now();

        if let Err(e) = self.session.transition(Transition::BeginConnect) {
            debug!(error = %e, "Connect while not idle");
            return Err(self.failure(
                ConnectFailureReason::NotIdle(self.session.connection_state()),
                start,
            ));
        }

        let addr = (self.server.host.as_str(), self.server.port);
        let stream = match tokio::time::timeout(self.settings.connect_timeout(), TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(self.connect_failed(e.into(), start)),
            Err(_) => return Err(self.connect_failed(ConnectFailureReason::Timeout, start)),
        };

        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "Failed to set TCP_NODELAY");
        }

        let (reader, writer) = stream.into_split();
        self.session.attach(reader, writer).await;
        if let Err(e) = self.session.transition(Transition::Established) {
            self.session.close().await;
            return Err(self.failure(ConnectFailureReason::Handshake(e), start));
        }

        let elapsed = start.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "Connected");
        self.session
            .info(&format!("connected in {:.3}s", elapsed.as_secs_f64()));

        if let Err(e) = self.register().await {
            warn!(error = %e, "Registration failed");
            self.disconnect().await;
            return Err(self.failure(ConnectFailureReason::Handshake(e), start));
        }

        if let Err(e) = self.start_listen().await {
            warn!(error = %e, "Failed to start reader");
            self.disconnect().await;
            return Err(self.failure(ConnectFailureReason::Handshake(e), start));
        }

        Ok(())
    }

    fn connect_failed(&self, reason: ConnectFailureReason, start: Instant) -> ConnectFailure {
        let _ = self.session.transition(Transition::ConnectFailed);
        let failure = self.failure(reason, start);
        warn!(error = %failure, "Connect failed");
        self.session.error(&format!(
            "failed to connect ({:.3}s) to {} at {}",
            failure.elapsed.as_secs_f64(),
            self.server.name,
            self.server.host
        ));
        failure
    }

    fn failure(&self, reason: ConnectFailureReason, start: Instant) -> ConnectFailure {
        ConnectFailure {
            host: self.server.host.clone(),
            port: self.server.port,
            reason,
            elapsed: start.elapsed(),
        }
    }

    /// Send the registration handshake.
    ///
    /// The session is marked registered as soon as the commands are written;
    /// the server's welcome is not awaited.
    pub async fn register(&self) -> Result<(), ClientError> {
        if !self.session.connection_state().is_connected() {
            return Err(ClientError::NotConnected);
        }

        self.session.send(&Command::cap_ls()).await?;
        if let Some(password) = self.server.password() {
            self.session
                .send(&Command::PASS(password.to_string()))
                .await?;
        }

        // NICK and USER go out in one write.
        let nick = Command::NICK(self.server.nickname.clone()).to_string();
        let user = Command::user(&self.server.username).to_string();
        self.session.send_lines([nick, user]).await?;

        self.session.transition(Transition::Register)?;
        debug!(server = %self.server.name, nick = %self.server.nickname, "Registration sent");
        Ok(())
    }

    /// Start the background reader task. No-op if already listening.
    pub async fn start_listen(&mut self) -> Result<(), ClientError> {
        if self.is_listening() {
            return Ok(());
        }

        // A reader that ended on its own (peer EOF) leaves its handle behind.
        if let Some(stale) = self.listener.take() {
            stale.stop().await;
        }

        self.session.transition(Transition::StartListening)?;
        self.listener = Some(Listener::spawn(
            Arc::clone(&self.session),
            Arc::clone(&self.dispatcher),
            self.settings.read_timeout(),
        ));
        Ok(())
    }

    /// Signal the reader task and wait for it to exit.
    pub async fn stop_listen(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.stop().await;
        }
        if self.is_listening() {
            let _ = self.session.transition(Transition::StopListening);
        }
    }

    /// Stop listening, close the socket and return to `Disconnected`.
    pub async fn disconnect(&mut self) {
        self.stop_listen().await;
        self.session.close().await;
        let _ = self.session.transition(Transition::Disconnect);
        self.session.set_current_channel(DEFAULT_CHANNEL);
        debug!(server = %self.server.name, "Disconnected");
    }

    // ------------------------------------------------------------------------
    // I/O
    // ------------------------------------------------------------------------

    /// Send `COMMAND arg1 arg2 ... :content`. Dropped when not connected.
    pub async fn send_command<S: AsRef<str>>(
        &self,
        command: &str,
        args: &[S],
        content: &str,
    ) -> Result<(), ClientError> {
        self.session.send_command(command, args, content).await
    }

    /// PRIVMSG `text` to the current channel.
    pub async fn send_message(&self, text: &str) -> Result<(), ClientError> {
        self.session.send_message(text).await
    }

    /// Write one raw line. Dropped when not connected.
    pub async fn send_raw(&self, line: &str) -> Result<(), ClientError> {
        self.session.send_raw(line).await
    }

    /// Read one line directly. Only meaningful while not listening.
    pub async fn read_message(&self, timeout: Duration) -> Result<Incoming, ClientError> {
        self.session.read_message(timeout).await
    }

    /// Wait until `predicate` holds for the session state, at most `timeout`.
    pub async fn wait_for<F>(&self, predicate: F, timeout: Duration) -> bool
    where
        F: FnMut(&SessionState) -> bool,
    {
        self.session.wait_for(predicate, timeout).await
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn state(&self) -> ConnectionState {
        self.session.connection_state()
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    pub fn is_registered(&self) -> bool {
        self.state().is_registered()
    }

    pub fn is_listening(&self) -> bool {
        self.state().is_listening()
    }

    /// Connected, registered and listening.
    pub fn ready(&self) -> bool {
        let state = self.state();
        state.is_connected() && state.is_registered() && state.is_listening()
    }

    /// Multi-line status summary.
    pub fn status(&self) -> String {
        self.state().to_string()
    }

    pub fn current_channel(&self) -> String {
        self.session.current_channel()
    }

    pub fn name(&self) -> &str {
        &self.server.name
    }

    pub fn host(&self) -> &str {
        &self.server.host
    }

    pub fn port(&self) -> u16 {
        self.server.port
    }

    pub fn username(&self) -> &str {
        &self.server.username
    }

    pub fn nickname(&self) -> &str {
        &self.server.nickname
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // ------------------------------------------------------------------------
    // Info hook
    // ------------------------------------------------------------------------

    /// Subscribe to user-facing info strings.
    pub fn set_on_info<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.session.info_sink().set_callback(callback);
    }

    /// Surface an info string through the hook.
    pub fn info(&self, text: &str) {
        self.session.info(text);
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}:{})", self.server.name, self.server.host, self.server.port)?;
        writeln!(f, "user: {}, nick: {}", self.server.username, self.server.nickname)?;
        write!(f, "{}", self.status())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(listener) = &self.listener {
            listener.signal();
        }
    }
}
