//! Message dispatch.
//!
//! Lookup order is fixed:
//! 1. numeric replies go to [`NumericHandler`];
//! 2. handlers registered at construction, first exact name match wins;
//! 3. built-in PING / NOTICE / CAP / PRIVMSG;
//! 4. anything else is reported as unrecognized.
//!
//! The registered table is immutable once the `Dispatcher` is built.

use slirc_proto::ParsedMessage;
use tracing::{debug, instrument, warn};

use super::channel::JoinHandler;
use super::context::{Context, Handler};
use super::messaging::{CapHandler, NoticeHandler, PingHandler, PrivmsgHandler};
use super::numeric::NumericHandler;

/// Routes parsed messages to handlers.
pub struct Dispatcher {
    handlers: Vec<(String, Box<dyn Handler>)>,
}

/// Builder for a [`Dispatcher`]'s registered handler table.
#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: Vec<(String, Box<dyn Handler>)>,
}

impl DispatcherBuilder {
    /// Register `handler` for `command` (matched case-insensitively).
    ///
    /// Registration order is lookup order.
    pub fn handler(mut self, command: &str, handler: impl Handler + 'static) -> Self {
        self.handlers
            .push((command.to_ascii_lowercase(), Box::new(handler)));
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            handlers: self.handlers,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// A dispatcher with no registered handlers, only the built-ins.
    pub fn empty() -> Self {
        Self::builder().build()
    }

    /// The client's standard table: JOIN tracking on top of the built-ins.
    pub fn with_defaults() -> Self {
        Self::builder().handler("join", JoinHandler).build()
    }

    /// Dispatch `msg`, returning whether any handler took it.
    ///
    /// Handler failures are logged; the message still counts as handled.
    #[instrument(level = "debug", skip_all, fields(command = %msg.command))]
    pub async fn dispatch(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> bool {
        if msg.is_numeric() {
            run(&NumericHandler, ctx, msg).await;
            return true;
        }

        if let Some((_, handler)) = self.handlers.iter().find(|(name, _)| *name == msg.command) {
            run(handler.as_ref(), ctx, msg).await;
            return true;
        }

        let builtin: Option<&dyn Handler> = match msg.command.as_str() {
            "ping" => Some(&PingHandler),
            "notice" => Some(&NoticeHandler),
            "cap" => Some(&CapHandler),
            "privmsg" => Some(&PrivmsgHandler),
            _ => None,
        };

        match builtin {
            Some(handler) => {
                run(handler, ctx, msg).await;
                true
            }
            None => {
                debug!(message = %msg, "Unrecognized command");
                ctx.error(&format!("unrecognized command {:?}: {}", msg.command, msg));
                false
            }
        }
    }
}

async fn run(handler: &dyn Handler, ctx: &mut Context<'_>, msg: &ParsedMessage) {
    if let Err(e) = handler.handle(ctx, msg).await {
        warn!(command = %msg.command, error = %e, "Handler failed");
    }
}
