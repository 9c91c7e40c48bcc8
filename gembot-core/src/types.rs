//! Core types: user, channel, attachment, message, handler response, and the
//! Handler/Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message author identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    /// True for messages authored by a bot account (including this bot).
    pub is_bot: bool,
}

/// Channel (guild channel or direct message) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    pub kind: String,
}

impl Channel {
    /// True when the channel is a direct/private conversation with the bot.
    pub fn is_private(&self) -> bool {
        self.kind == "private"
    }
}

/// A file attached to a message, fetchable by URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
}

/// A single inbound message with author, channel, content, and attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub channel: Channel,
    pub content: String,
    pub attachments: Vec<Attachment>,
    /// Whether the message broadcasts to all participants (@everyone / @here).
    pub mention_everyone: bool,
    /// Whether the bot itself is mentioned; set by the transport adapter.
    pub mentions_me: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Message text with all platform markup tags (`<...>`) removed.
    pub fn cleaned_content(&self) -> String {
        crate::markup::strip_markup(&self.content)
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later
/// middleware can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. The chain runs all
/// before hooks, then handle until Stop/Reply, then after hooks in reverse.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

/// Cross-cutting hook pair around the whole handler phase. `before` returning
/// false stops the chain silently; `after` sees the final response.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
