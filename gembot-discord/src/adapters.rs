//! Adapters from Discord (serenity) types to gembot_core types.
//! Depends only on serenity and gembot_core type definitions.

use gembot_core::{Attachment, Channel, Message, ToCoreMessage, ToCoreUser, User};
use serenity::model::id::UserId;

/// Wraps a serenity User for conversion to core [`User`].
pub struct DiscordUserWrapper<'a>(pub &'a serenity::model::user::User);

impl<'a> ToCoreUser for DiscordUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.get(),
            name: self.0.name.clone(),
            is_bot: self.0.bot,
        }
    }
}

/// Wraps a serenity Message for conversion to core [`Message`]. `bot_id` is the
/// identity recorded at ready time; `mentions_me` is false until it is known.
pub struct DiscordMessageWrapper<'a> {
    pub message: &'a serenity::model::channel::Message,
    pub bot_id: Option<UserId>,
}

impl<'a> ToCoreMessage for DiscordMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let message = self.message;
        Message {
            id: message.id.get().to_string(),
            user: DiscordUserWrapper(&message.author).to_core(),
            channel: Channel {
                id: message.channel_id.get(),
                kind: if message.guild_id.is_none() {
                    "private".to_string()
                } else {
                    "guild".to_string()
                },
            },
            content: message.content.clone(),
            attachments: message
                .attachments
                .iter()
                .map(|attachment| Attachment {
                    filename: attachment.filename.clone(),
                    url: attachment.url.clone(),
                })
                .collect(),
            mention_everyone: message.mention_everyone,
            mentions_me: self
                .bot_id
                .map(|bot_id| message.mentions_user_id(bot_id))
                .unwrap_or(false),
            created_at: chrono::Utc::now(),
        }
    }
}
