//! Event runner: converts serenity messages to core messages and hands them to
//! the handler chain, one spawned task per message.

use async_trait::async_trait;
use gembot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use serenity::gateway::ActivityData;
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id::UserId;
use serenity::prelude::{Context, EventHandler};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::adapters::DiscordMessageWrapper;

/// Intents required for guild/DM messages with content and attachments.
pub fn default_intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Serenity event handler: records the bot identity at ready, converts each
/// inbound message, logs author and text, and spawns the chain.
pub struct DiscordRunner {
    chain: HandlerChain,
    bot_id: Arc<RwLock<Option<UserId>>>,
    bot_name: Arc<RwLock<Option<String>>>,
}

impl DiscordRunner {
    /// `bot_name` is shared with handlers that need the bot's display name
    /// (it is filled in once the gateway identifies itself).
    pub fn new(chain: HandlerChain, bot_name: Arc<RwLock<Option<String>>>) -> Self {
        Self {
            chain,
            bot_id: Arc::new(RwLock::new(None)),
            bot_name,
        }
    }
}

#[async_trait]
impl EventHandler for DiscordRunner {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("----------------------------------------");
        info!(username = %ready.user.name, "Gemini bot logged in");
        info!("----------------------------------------");
        *self.bot_id.write().await = Some(ready.user.id);
        *self.bot_name.write().await = Some(ready.user.name.clone());
        ctx.set_activity(Some(ActivityData::listening("mentions and DMs")));
    }

    async fn message(&self, _ctx: Context, msg: serenity::model::channel::Message) {
        let bot_id = *self.bot_id.read().await;
        let core_msg = DiscordMessageWrapper {
            message: &msg,
            bot_id,
        }
        .to_core();

        info!(
            user_id = core_msg.user.id,
            channel_id = core_msg.channel.id,
            message_content = %core_msg.content,
            "Received message"
        );

        let chain = self.chain.clone();
        tokio::spawn(async move {
            if let Err(e) = chain.handle(&core_msg).await {
                error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
            }
        });
    }
}
