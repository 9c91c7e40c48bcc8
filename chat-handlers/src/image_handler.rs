//! Image path: attachment validation, download, bounded downscale, and
//! vision-model generation.

use async_trait::async_trait;
use base64::Engine as _;
use gembot_core::{
    send_chunked, ChatGateway, GembotError, Handler, HandlerResponse, Message, Result,
};
use gemini_client::{GenerationClient, GenerationOutcome, InlineImage};
use history::{ConversationHistory, TurnRole};
use image::ImageFormat;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::resize::{resize_to_limit, MAX_IMAGE_BYTES};
use crate::{DEFAULT_IMAGE_PROMPT, FAILURE_MARKER, REACTION_IMAGE};

const MSG_UNSUPPORTED: &str =
    "🗑️ Unsupported file extension. Supported extensions are: .png, .jpg, .jpeg, .gif, .webp";
const MSG_DOWNLOAD_FAILED: &str = "Unable to download the image.";
const MSG_PROCESSING_FAILED: &str = "Unable to process the image.";

/// Extension table: canonical MIME type and codec per supported extension.
const SUPPORTED: [(&str, &str, ImageFormat); 5] = [
    (".png", "image/png", ImageFormat::Png),
    (".jpg", "image/jpeg", ImageFormat::Jpeg),
    (".jpeg", "image/jpeg", ImageFormat::Jpeg),
    (".gif", "image/gif", ImageFormat::Gif),
    (".webp", "image/webp", ImageFormat::WebP),
];

/// Lowercased extension of `filename` including the dot, from the last dot.
fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
}

fn lookup(extension: &str) -> Option<(&'static str, ImageFormat)> {
    SUPPORTED
        .iter()
        .find(|(ext, _, _)| *ext == extension)
        .map(|(_, mime, format)| (*mime, *format))
}

/// Answers messages carrying attachments via the vision model. Each attachment
/// is validated, fetched, downscaled under the inline payload limit, and
/// submitted inline with the cleaned text; failures are reported per
/// attachment without aborting the rest.
pub struct ImageHandler {
    gateway: Arc<dyn ChatGateway>,
    generator: Arc<dyn GenerationClient>,
    history: ConversationHistory,
    http: reqwest::Client,
    chunk_len: usize,
    max_image_bytes: usize,
}

impl ImageHandler {
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
            http: reqwest::Client::new(),
            chunk_len,
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Overrides the payload ceiling (tests use a small one).
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// Fetches attachment bytes; any non-success status or transport fault is
    /// reported as a download failure.
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, String> {
        let response = self.http.get(url).send().await.map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string())
    }

    async fn process_attachment(
        &self,
        message: &Message,
        filename: &str,
        url: &str,
        cleaned: &str,
    ) -> Result<Option<String>> {
        let extension = file_extension(filename).unwrap_or_default();
        let Some((mime_type, format)) = lookup(&extension) else {
            info!(filename = %filename, "Rejecting unsupported attachment");
            self.gateway
                .send_message(&message.channel, MSG_UNSUPPORTED)
                .await?;
            return Ok(None);
        };

        if let Err(e) = self.gateway.add_reaction(message, REACTION_IMAGE).await {
            debug!(error = %e, "Failed to add reaction");
        }

        let bytes = match self.fetch(url).await {
            Ok(bytes) => bytes,
            Err(reason) => {
                error!(url = %url, reason = %reason, "Attachment download failed");
                self.gateway
                    .send_message(&message.channel, MSG_DOWNLOAD_FAILED)
                    .await?;
                return Ok(None);
            }
        };

        let resized = match resize_to_limit(&bytes, format, self.max_image_bytes) {
            Ok(resized) => resized,
            Err(e) => {
                error!(filename = %filename, error = %e, "Attachment processing failed");
                self.gateway
                    .send_message(&message.channel, MSG_PROCESSING_FAILED)
                    .await?;
                return Ok(None);
            }
        };

        let image = InlineImage {
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(&resized),
        };
        let prompt = if cleaned.trim().is_empty() {
            DEFAULT_IMAGE_PROMPT
        } else {
            cleaned
        };

        self.history
            .append(message.user.id, cleaned, TurnRole::User)
            .await;

        let outcome = self
            .generator
            .generate_with_image(&image, prompt)
            .await
            .map_err(|e| GembotError::Generation(e.to_string()))?;

        match outcome {
            GenerationOutcome::Reply(text) => {
                self.history
                    .append(message.user.id, &text, TurnRole::System)
                    .await;
                send_chunked(self.gateway.as_ref(), &message.channel, &text, self.chunk_len)
                    .await?;
                Ok(Some(text))
            }
            GenerationOutcome::Failure(reason) => {
                info!(user_id = message.user.id, reason = %reason, "Generation failed");
                self.gateway
                    .send_message(&message.channel, &format!("{}{}", FAILURE_MARKER, reason))
                    .await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Handler for ImageHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.attachments.is_empty() {
            return Ok(HandlerResponse::Continue);
        }
        let cleaned = message.cleaned_content();
        info!(
            user_id = message.user.id,
            attachment_count = message.attachments.len(),
            content = %cleaned,
            "step: image request"
        );

        if let Err(e) = self.gateway.broadcast_typing(&message.channel).await {
            debug!(error = %e, "Failed to broadcast typing");
        }

        let mut last_reply = None;
        for attachment in &message.attachments {
            if let Some(text) = self
                .process_attachment(message, &attachment.filename, &attachment.url, &cleaned)
                .await?
            {
                last_reply = Some(text);
            }
        }

        Ok(match last_reply {
            Some(text) => HandlerResponse::Reply(text),
            None => HandlerResponse::Stop,
        })
    }
}
