//! Built-in text command handlers: PING, NOTICE, CAP and PRIVMSG.

use async_trait::async_trait;
use slirc_proto::{Command, ParsedMessage};

use super::context::{Context, Handler};
use crate::error::HandlerResult;

/// Keep-alive: answer PING with PONG on the same connection.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult {
        // PING :<token> or PING <token>
        let token = if msg.content.is_empty() {
            msg.arg(0)
        } else {
            Some(msg.content.as_str())
        };
        ctx.send(&Command::pong(token)).await
    }
}

/// Surface NOTICE text.
pub struct NoticeHandler;

#[async_trait]
impl Handler for NoticeHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult {
        ctx.info(&format!("NOTICE: {}", msg.content));
        Ok(())
    }
}

/// Capability negotiation is not supported; refuse whatever the server offers.
pub struct CapHandler;

#[async_trait]
impl Handler for CapHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult {
        ctx.info(&format!(
            "capability negotiation not supported ({})",
            msg.parameters.join(" ")
        ));
        ctx.send_raw("no").await
    }
}

/// Surface PRIVMSG text. The sender and target are not rendered.
pub struct PrivmsgHandler;

#[async_trait]
impl Handler for PrivmsgHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult {
        ctx.info(&msg.content);
        Ok(())
    }
}
