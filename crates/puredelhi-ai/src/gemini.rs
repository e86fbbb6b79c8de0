use crate::provider::{advice_prompt, Advice, AdviceProvider, AdviceRequest, AdviceResult};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use puredelhi_core::AiConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Gemini `generateContent` client. Tries the primary model once and, on
/// a non-success status, makes a single attempt with the fallback model.
pub struct GeminiProvider {
    config: AiConfig,
    api_key: SecretString,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: AiConfig) -> AdviceResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("AI API key not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Request URL for a model. The key travels in the `x-goog-api-key`
    /// header, never in the URL, so transport errors cannot echo it.
    fn model_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn call_model(&self, model: &str, prompt: &str) -> AdviceResult<GenerateResponse> {
        let url = self.model_url(model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", model))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", model, status, detail));
        }

        response
            .json::<GenerateResponse>()
            .await
            .with_context(|| format!("Failed to decode {} response", model))
    }
}

#[async_trait]
impl AdviceProvider for GeminiProvider {
    async fn advise(&self, request: &AdviceRequest) -> AdviceResult<Advice> {
        let prompt = advice_prompt(request);

        let (model, response) = match self.call_model(&self.config.primary_model, &prompt).await
        {
            Ok(response) => (self.config.primary_model.clone(), response),
            Err(e) => {
                warn!(
                    primary = %self.config.primary_model,
                    fallback = %self.config.fallback_model,
                    error = %e,
                    "Primary model failed, trying fallback"
                );
                let response = self
                    .call_model(&self.config.fallback_model, &prompt)
                    .await?;
                (self.config.fallback_model.clone(), response)
            }
        };

        let advice = response
            .first_text()
            .unwrap_or_else(|| {
                "Prioritize N95 protection and high-efficiency indoor air purification."
                    .to_string()
            });

        Ok(Advice { advice, model })
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<String> {
        self.candidates
            .first()?
            .content
            .parts
            .first()
            .map(|p| p.text.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}
