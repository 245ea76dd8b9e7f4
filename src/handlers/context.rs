//! Handler context and the `Handler` trait.

use async_trait::async_trait;
use slirc_proto::{Command, ParsedMessage};

use crate::error::HandlerResult;
use crate::network::Session;

/// Context passed to each handler: the session the message arrived on.
pub struct Context<'a> {
    pub session: &'a Session,
}

impl<'a> Context<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Send a command back on the same connection.
    pub async fn send(&self, command: &Command) -> HandlerResult {
        self.session.send(command).await?;
        Ok(())
    }

    /// Write a raw line back on the same connection.
    pub async fn send_raw(&self, line: &str) -> HandlerResult {
        self.session.send_raw(line).await?;
        Ok(())
    }

    pub fn info(&self, text: &str) {
        self.session.info(text);
    }

    pub fn error(&self, text: &str) {
        self.session.error(text);
    }

    pub fn nickname(&self) -> &str {
        self.session.nickname()
    }

    pub fn current_channel(&self) -> String {
        self.session.current_channel()
    }

    pub fn set_current_channel(&self, channel: &str) {
        self.session.set_current_channel(channel);
    }
}

/// A handler for one inbound command.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult;
}

/// Adapter that turns a synchronous callback into a [`Handler`].
///
/// Useful for handlers that only surface text or update session state.
pub struct FnHandler<F>(F);

/// Wrap a synchronous callback as a [`Handler`].
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&Context<'_>, &ParsedMessage) -> HandlerResult + Send + Sync,
{
    FnHandler(f)
}

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(&Context<'_>, &ParsedMessage) -> HandlerResult + Send + Sync,
{
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult {
        (self.0)(ctx, msg)
    }
}
