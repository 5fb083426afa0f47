//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::data_url::DecodedImage;
use crate::error::AiError;
use crate::GeminiCfg;

/// A multimodal model that answers a text prompt about one image.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn generate(&self, prompt: &str, image: &DecodedImage) -> Result<String, AiError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    cfg: GeminiCfg,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
    #[serde(default)]
    total_token_count: Option<u32>,
}

impl GeminiClient {
    pub fn new(cfg: GeminiCfg) -> Result<Self, AiError> {
        if cfg.api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }
        let client = Client::builder().build()?;
        Ok(Self { cfg, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        )
    }
}

#[async_trait]
impl VisionModel for GeminiClient {
    async fn generate(&self, prompt: &str, image: &DecodedImage) -> Result<String, AiError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(prompt),
                    Part::InlineData(InlineData {
                        mime_type: &image.mime_type,
                        data: STANDARD.encode(&image.bytes),
                    }),
                ],
            }],
        };

        debug!(
            model = %self.cfg.model,
            mime = %image.mime_type,
            image_bytes = image.bytes.len(),
            "calling gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.cfg.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(%status, body = %text, "gemini request failed");
            return Err(AiError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &parsed.usage_metadata {
            info!(
                prompt_tokens = ?usage.prompt_token_count,
                response_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                "gemini usage"
            );
        }

        response_text(parsed)
    }
}

/// Text of the first candidate, all parts joined.
fn response_text(resp: GenerateResponse) -> Result<String, AiError> {
    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or(AiError::EmptyResponse)?;

    if let Some(reason) = &candidate.finish_reason {
        debug!(%reason, "gemini finish reason");
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text.to_string())
}
