//! # Gemini API client
//!
//! Thin wrapper around the Gemini `generateContent` REST endpoint for text and
//! text+image generation. Provides token masking for safe logging, fixed
//! generation/safety configuration, and the [`GenerationClient`] trait used by
//! the chat handlers (tests substitute mock implementations).

use async_trait::async_trait;

mod gemini;
pub mod wire;

pub use gemini::{GeminiClient, TEXT_MODEL, VISION_MODEL};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last
/// 4 chars. If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        let head_len = 7.min(len);
        let tail_len = 4.min(len.saturating_sub(head_len));
        let head = &token[..head_len];
        let tail = if tail_len > 0 {
            &token[len - tail_len..]
        } else {
            ""
        };
        format!("{}***{}", head, tail)
    }
}

/// What a generation call produced. Backend-reported problems (API error body,
/// safety block, empty candidate list) are a `Failure` carrying a user-showable
/// reason, not an `Err`; transport faults remain `anyhow::Error`. Callers must
/// handle both variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The model produced a reply.
    Reply(String),
    /// The backend reported an error or refused the prompt.
    Failure(String),
}

/// An image submitted inline with a generation request: raw base64 payload plus
/// its declared MIME type.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

/// Generation interface: text-only and text+inline-image completion.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Returns the model reply for a pure text prompt.
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<GenerationOutcome>;

    /// Returns the model reply for an inline image plus accompanying text.
    async fn generate_with_image(
        &self,
        image: &InlineImage,
        prompt: &str,
    ) -> anyhow::Result<GenerationOutcome>;
}
