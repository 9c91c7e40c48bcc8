//! Gemini implementation of [`GenerationClient`] over reqwest.

use anyhow::Context as _;
use async_trait::async_trait;
use tracing::{info, instrument};

use crate::wire::{
    ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part, SafetySetting,
};
use crate::{mask_token, GenerationClient, GenerationOutcome, InlineImage};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for pure text prompts.
pub const TEXT_MODEL: &str = "gemini-pro";
/// Model used for prompts carrying an inline image.
pub const VISION_MODEL: &str = "gemini-pro-vision";

/// Sampling parameters for text prompts.
fn text_generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.9,
        top_p: 1.0,
        top_k: 1,
        max_output_tokens: 8192,
    }
}

/// Sampling parameters for image prompts.
fn vision_generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.4,
        top_p: 1.0,
        top_k: 32,
        max_output_tokens: 2048,
    }
}

/// Block at medium and above across all four harm categories.
fn default_safety_settings() -> Vec<SafetySetting> {
    const CATEGORIES: [&str; 4] = [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ];
    CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect()
}

/// Gemini REST client. Holds the API key, a shared reqwest client, and the
/// model names; the base URL can be overridden (proxies, tests).
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    text_model: String,
    vision_model: String,
}

impl GeminiClient {
    /// Builds a client using the given API key and the default API base URL.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_URL.to_string())
    }

    /// Builds a client with a custom base URL (e.g. for proxies or tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            text_model: TEXT_MODEL.to_string(),
            vision_model: VISION_MODEL.to_string(),
        }
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = model.into();
        self
    }

    /// Posts one `generateContent` request and maps the response to a
    /// [`GenerationOutcome`]. API error bodies, safety blocks, and empty
    /// candidate lists become `Failure`; transport faults are `Err`.
    async fn generate(
        &self,
        model: &str,
        parts: Vec<Part>,
        config: GenerationConfig,
    ) -> anyhow::Result<GenerationOutcome> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: config,
            safety_settings: default_safety_settings(),
        };

        info!(
            model = %model,
            api_key = %mask_token(&self.api_key),
            "Gemini generateContent request"
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            info!(status = %status, reason = %reason, "Gemini reported an error");
            return Ok(GenerationOutcome::Failure(reason));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Gemini response was not valid JSON")?;

        if let Some(reason) = body
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Ok(GenerationOutcome::Failure(format!(
                "Prompt blocked: {}",
                reason
            )));
        }

        match body.candidates.first() {
            Some(candidate) => {
                let text = candidate.text();
                if text.is_empty() {
                    let reason = candidate
                        .finish_reason
                        .clone()
                        .unwrap_or_else(|| "empty response".to_string());
                    Ok(GenerationOutcome::Failure(format!(
                        "No content returned: {}",
                        reason
                    )))
                } else {
                    Ok(GenerationOutcome::Reply(text))
                }
            }
            None => Ok(GenerationOutcome::Failure(
                "No candidates returned".to_string(),
            )),
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    #[instrument(skip(self, prompt))]
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<GenerationOutcome> {
        self.generate(
            &self.text_model,
            vec![Part::Text(prompt.to_string())],
            text_generation_config(),
        )
        .await
    }

    #[instrument(skip(self, image, prompt))]
    async fn generate_with_image(
        &self,
        image: &InlineImage,
        prompt: &str,
    ) -> anyhow::Result<GenerationOutcome> {
        let parts = vec![
            Part::InlineData(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
            Part::Text(format!("\n{}", prompt)),
        ];
        self.generate(&self.vision_model, parts, vision_generation_config())
            .await
    }
}
