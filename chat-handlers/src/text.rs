//! Text path: prompt from the current message (or the full history window),
//! Gemini text generation, chunked delivery.

use async_trait::async_trait;
use gembot_core::{
    send_chunked, ChatGateway, GembotError, Handler, HandlerResponse, Message, Result,
};
use gemini_client::{GenerationClient, GenerationOutcome};
use history::{ConversationHistory, TurnRole};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{FAILURE_MARKER, REACTION_TEXT};

/// Answers plain text messages via Gemini. With history enabled, the prompt is
/// the user's full formatted window and both sides of the exchange are
/// recorded; with history disabled, the prompt is the cleaned text alone and
/// nothing is recorded.
pub struct TextHandler {
    gateway: Arc<dyn ChatGateway>,
    generator: Arc<dyn GenerationClient>,
    history: ConversationHistory,
    chunk_len: usize,
}

impl TextHandler {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        generator: Arc<dyn GenerationClient>,
        history: ConversationHistory,
        chunk_len: usize,
    ) -> Self {
        Self {
            gateway,
            generator,
            history,
            chunk_len,
        }
    }
}

#[async_trait]
impl Handler for TextHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.attachments.is_empty() {
            return Ok(HandlerResponse::Continue);
        }
        let cleaned = message.cleaned_content();
        info!(
            user_id = message.user.id,
            content = %cleaned,
            "step: text request"
        );

        // Best-effort acknowledgment; a failed reaction never aborts the request.
        if let Err(e) = self.gateway.add_reaction(message, REACTION_TEXT).await {
            debug!(error = %e, "Failed to add reaction");
        }
        if let Err(e) = self.gateway.broadcast_typing(&message.channel).await {
            debug!(error = %e, "Failed to broadcast typing");
        }

        let outcome = if self.history.is_enabled() {
            self.history
                .append(message.user.id, &cleaned, TurnRole::User)
                .await;
            let prompt = self.history.format(message.user.id).await;
            self.generator.generate_text(&prompt).await
        } else {
            self.generator.generate_text(&cleaned).await
        }
        .map_err(|e| GembotError::Generation(e.to_string()))?;

        match outcome {
            GenerationOutcome::Reply(text) => {
                self.history
                    .append(message.user.id, &text, TurnRole::System)
                    .await;
                send_chunked(self.gateway.as_ref(), &message.channel, &text, self.chunk_len)
                    .await?;
                Ok(HandlerResponse::Reply(text))
            }
            GenerationOutcome::Failure(reason) => {
                info!(user_id = message.user.id, reason = %reason, "Generation failed");
                self.gateway
                    .send_message(&message.channel, &format!("{}{}", FAILURE_MARKER, reason))
                    .await?;
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
