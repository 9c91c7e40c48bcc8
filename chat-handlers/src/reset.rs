//! RESET command: clears the requesting user's conversation history.

use async_trait::async_trait;
use gembot_core::{ChatGateway, Handler, HandlerResponse, Message, Result};
use history::ConversationHistory;
use std::sync::Arc;
use tracing::{info, instrument};

/// Command token recognized anywhere in the message, case-insensitive.
const RESET_TOKEN: &str = "RESET";

/// Clears history for the author when the cleaned text contains `RESET`.
/// Only applies to text messages; messages with attachments fall through to the
/// image path untouched. No AI call is made.
pub struct ResetHandler {
    history: ConversationHistory,
    gateway: Arc<dyn ChatGateway>,
}

impl ResetHandler {
    pub fn new(history: ConversationHistory, gateway: Arc<dyn ChatGateway>) -> Self {
        Self { history, gateway }
    }
}

#[async_trait]
impl Handler for ResetHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.attachments.is_empty() {
            return Ok(HandlerResponse::Continue);
        }
        let cleaned = message.cleaned_content();
        if !cleaned.to_uppercase().contains(RESET_TOKEN) {
            return Ok(HandlerResponse::Continue);
        }

        self.history.reset(message.user.id).await;
        info!(user_id = message.user.id, "History reset requested");
        self.gateway
            .send_message(
                &message.channel,
                &format!("🧹 History Reset for user: {}", message.user.name),
            )
            .await?;
        Ok(HandlerResponse::Stop)
    }
}
