//! Background reader loop.
//!
//! One task per connection: read a line, parse it, dispatch it, repeat until
//! the stop signal flips or the peer goes away. The read is raced against
//! the stop signal, so `stop_listen` never waits longer than one read
//! timeout.

use std::sync::Arc;
use std::time::Duration;

use slirc_proto::ParsedMessage;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::session::{Incoming, Session};
use super::state::Transition;
use crate::handlers::{Context, Dispatcher};

/// Handle to a running reader task.
pub(super) struct Listener {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Listener {
    pub(super) fn spawn(
        session: Arc<Session>,
        dispatcher: Arc<Dispatcher>,
        read_timeout: Duration,
    ) -> Self {
        let (stop, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run(session, dispatcher, read_timeout, stop_rx));
        Self { stop, handle }
    }

    /// Ask the task to stop without waiting for it.
    pub(super) fn signal(&self) {
        let _ = self.stop.send(true);
    }

    /// Stop the task and wait for it to exit.
    pub(super) async fn stop(self) {
        self.signal();
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Reader task ended abnormally");
        }
    }
}

#[instrument(skip_all, fields(server = %session.name()), name = "listener")]
async fn run(
    session: Arc<Session>,
    dispatcher: Arc<Dispatcher>,
    read_timeout: Duration,
    mut stop: watch::Receiver<bool>,
) {
    debug!("Reader task started");

    loop {
        if *stop.borrow_and_update() {
            break;
        }

        let incoming = tokio::select! {
            biased;
            _ = stop.changed() => break,
            incoming = session.read_message(read_timeout) => incoming,
        };

        match incoming {
            Ok(Incoming::Line(line)) => {
                let msg = ParsedMessage::parse(&line);
                let mut ctx = Context::new(&session);
                let handled = dispatcher.dispatch(&mut ctx, &msg).await;
                debug!(command = %msg.command, handled, "Dispatched");
            }
            Ok(Incoming::Timeout) => {}
            Ok(Incoming::Closed) => {
                info!("Server closed the connection");
                session.info("connection closed by server");
                session.close().await;
                let _ = session.transition(Transition::Disconnect);
                break;
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Read failed, stopping reader");
                session.error(&format!("read failed: {e}"));
                session.close().await;
                let _ = session.transition(Transition::Disconnect);
                break;
            }
        }
    }

    debug!("Reader task exited");
}
