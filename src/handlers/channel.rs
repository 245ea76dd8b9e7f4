//! JOIN tracking for the current channel.

use async_trait::async_trait;
use slirc_proto::ParsedMessage;

use super::context::{Context, Handler};
use crate::error::{HandlerError, HandlerResult};

/// Follows our own JOIN echoes and makes the joined channel current.
///
/// Joins by other users are surfaced as text only.
pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    async fn handle(&self, ctx: &mut Context<'_>, msg: &ParsedMessage) -> HandlerResult {
        // :nick!user@host JOIN #chan   or   :nick!user@host JOIN :#chan
        let channel = msg
            .arg(0)
            .or_else(|| (!msg.content.is_empty()).then_some(msg.content.as_str()))
            .ok_or(HandlerError::MissingParameter("JOIN"))?;

        let nick = msg.source_nick();
        if nick.eq_ignore_ascii_case(ctx.nickname()) {
            ctx.set_current_channel(channel);
            ctx.info(&format!("joined {channel}"));
        } else {
            ctx.info(&format!("{nick} joined {channel}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::InfoSink;
    use crate::network::{DEFAULT_CHANNEL, Session};

    fn session() -> Session {
        Session::new("test", "Veggie", InfoSink::new())
    }

    #[tokio::test]
    async fn test_own_join_sets_channel() {
        let s = session();
        let msg = ParsedMessage::parse(":veggie!v@host JOIN #rust");
        JoinHandler.handle(&mut Context::new(&s), &msg).await.unwrap();
        assert_eq!(s.current_channel(), "#rust");
    }

    #[tokio::test]
    async fn test_trailing_channel_form() {
        let s = session();
        let msg = ParsedMessage::parse(":Veggie!v@host JOIN :#general");
        JoinHandler.handle(&mut Context::new(&s), &msg).await.unwrap();
        assert_eq!(s.current_channel(), "#general");
    }

    #[tokio::test]
    async fn test_other_join_leaves_channel() {
        let s = session();
        let msg = ParsedMessage::parse(":alice!a@host JOIN #rust");
        JoinHandler.handle(&mut Context::new(&s), &msg).await.unwrap();
        assert_eq!(s.current_channel(), DEFAULT_CHANNEL);
    }

    #[tokio::test]
    async fn test_join_without_channel() {
        let s = session();
        let msg = ParsedMessage::parse(":veggie!v@host JOIN");
        let err = JoinHandler
            .handle(&mut Context::new(&s), &msg)
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::MissingParameter("JOIN")));
    }
}
