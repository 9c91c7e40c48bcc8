//! Wraps serenity's Http client and implements [`gembot_core::ChatGateway`].
//! Production code talks to Discord; tests substitute another gateway impl.

use async_trait::async_trait;
use gembot_core::{Channel, ChatGateway, GembotError, Message, Result};
use serenity::http::Http;
use serenity::model::channel::ReactionType;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;

/// Serenity-based implementation of [`ChatGateway`].
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    /// Creates a gateway from an existing serenity Http handle.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Creates a gateway with its own Http handle for the given bot token.
    pub fn from_token(token: &str) -> Self {
        Self::new(Arc::new(Http::new(token)))
    }
}

/// Parses a core message id (decimal string) back into a Discord message id.
fn parse_message_id(s: &str) -> Result<MessageId> {
    s.parse::<u64>()
        .map(MessageId::new)
        .map_err(|_| GembotError::Gateway(format!("Invalid message_id: {}", s)))
}

#[async_trait]
impl ChatGateway for SerenityGateway {
    async fn send_message(&self, channel: &Channel, text: &str) -> Result<()> {
        ChannelId::new(channel.id)
            .say(&self.http, text)
            .await
            .map_err(|e| GembotError::Gateway(e.to_string()))?;
        Ok(())
    }

    async fn add_reaction(&self, message: &Message, emoji: &str) -> Result<()> {
        let message_id = parse_message_id(&message.id)?;
        self.http
            .create_reaction(
                ChannelId::new(message.channel.id),
                message_id,
                &ReactionType::Unicode(emoji.to_string()),
            )
            .await
            .map_err(|e| GembotError::Gateway(e.to_string()))?;
        Ok(())
    }

    async fn broadcast_typing(&self, channel: &Channel) -> Result<()> {
        self.http
            .broadcast_typing(ChannelId::new(channel.id))
            .await
            .map_err(|e| GembotError::Gateway(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), MessageId::new(123));
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }
}
