//! Addressing gate and @everyone acknowledgment.

use async_trait::async_trait;
use gembot_core::{ChatGateway, Handler, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Middleware that decides whether the bot should look at a message at all:
/// bot-authored messages are always dropped (prevents self-reply loops), and
/// everything else must either mention the bot, arrive via DM, or broadcast to
/// everyone (so [`EveryoneHandler`] can acknowledge it).
pub struct AddressGate;

#[async_trait]
impl Middleware for AddressGate {
    async fn before(&self, message: &Message) -> Result<bool> {
        if message.user.is_bot {
            debug!(user_id = message.user.id, "Ignoring bot-authored message");
            return Ok(false);
        }
        if message.mention_everyone {
            return Ok(true);
        }
        let addressed = message.mentions_me || message.channel.is_private();
        if !addressed {
            debug!(
                user_id = message.user.id,
                channel_id = message.channel.id,
                "Ignoring message that does not address the bot"
            );
        }
        Ok(addressed)
    }
}

/// Answers @everyone broadcasts with a fixed acknowledgment instead of an AI
/// request. The bot name is filled in by the transport layer once it has
/// identified itself.
pub struct EveryoneHandler {
    bot_name: Arc<tokio::sync::RwLock<Option<String>>>,
    gateway: Arc<dyn ChatGateway>,
}

impl EveryoneHandler {
    pub fn new(
        bot_name: Arc<tokio::sync::RwLock<Option<String>>>,
        gateway: Arc<dyn ChatGateway>,
    ) -> Self {
        Self { bot_name, gateway }
    }
}

#[async_trait]
impl Handler for EveryoneHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.mention_everyone {
            return Ok(HandlerResponse::Continue);
        }
        let name = self
            .bot_name
            .read()
            .await
            .clone()
            .unwrap_or_else(|| "gembot".to_string());
        info!(user_id = message.user.id, "Acknowledging @everyone mention");
        self.gateway
            .send_message(&message.channel, &format!("{} at your service.", name))
            .await?;
        Ok(HandlerResponse::Stop)
    }
}
