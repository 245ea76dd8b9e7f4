//! Numeric reply rendering.
//!
//! Every numeric is handled; codes without a special case surface their
//! trailing content as-is.

use async_trait::async_trait;
use slirc_proto::{ParsedMessage, Response};

use super::context::{Context, Handler};
use crate::error::HandlerResult;

/// Handler for all numeric replies.
pub struct NumericHandler;

#[async_trait]
impl Handler for NumericHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult {
        let response = msg.numeric().and_then(Response::from_code);

        match response {
            Some(Response::ERR_ERRONEUSNICKNAME) => {
                ctx.error(&format!("bad nickname: {}", msg.content));
            }
            Some(Response::ERR_NICKNAMEINUSE) => {
                ctx.error(&format!("nickname in use: {}", msg.content));
            }
            Some(Response::RPL_WHOREPLY) => {
                let user = msg.arg(1).unwrap_or_default();
                ctx.info(&format!("{} > {}", user, msg.content));
            }
            _ => ctx.info(&msg.content),
        }

        Ok(())
    }
}
