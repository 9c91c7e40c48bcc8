//! Gateway abstraction for outbound chat actions.
//!
//! [`ChatGateway`] is transport-agnostic; gembot-discord implements it via serenity.
//! Tests substitute mock implementations.

use crate::error::Result;
use crate::types::{Channel, Message};
use async_trait::async_trait;

/// Abstraction for sending messages, reacting, and signalling activity.
/// Implementations map to a transport (e.g. Discord).
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Sends a text message to the given channel.
    async fn send_message(&self, channel: &Channel, text: &str) -> Result<()>;

    /// Adds an emoji reaction to the given message. Callers treat failures as
    /// best-effort and ignore them.
    async fn add_reaction(&self, message: &Message, emoji: &str) -> Result<()>;

    /// Shows a typing/activity indicator in the channel. Best-effort UX signal,
    /// not a correctness requirement.
    async fn broadcast_typing(&self, channel: &Channel) -> Result<()>;
}
