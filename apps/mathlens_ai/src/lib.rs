pub mod data_url;
pub mod error;
pub mod gemini;
pub mod normalize;
pub mod prompt;
pub mod serializers;
pub mod urls;
pub mod views;

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::data_url::DecodedImage;
use crate::error::AiError;
use crate::gemini::VisionModel;
use crate::serializers::mathlens_calculate::ExpressionRecord;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Clone)]
pub struct GeminiCfg {
    /// Required. GEMINI_API_KEY.
    pub api_key: String,
    /// Model id (default gemini-1.5-flash). Override with GEMINI_MODEL.
    pub model: String,
    /// Override with GEMINI_BASE_URL, e.g. for a proxy.
    pub base_url: String,
}

impl fmt::Debug for GeminiCfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiCfg")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiCfg {
    pub fn from_env() -> Result<Self, AiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(AiError::MissingApiKey)?;
        let model = lookup("GEMINI_MODEL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        let base_url = lookup("GEMINI_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

#[derive(Clone)]
pub struct AiState {
    pub model: Arc<dyn VisionModel>,
}

impl AiState {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }
}

/// Ask the model to solve what is drawn in `image`.
///
/// Upstream failures and unusable replies both come back as an empty list.
pub async fn analyze_image(
    model: &dyn VisionModel,
    image: &DecodedImage,
    variables: &Map<String, Value>,
) -> Vec<ExpressionRecord> {
    let prompt = prompt::build_prompt(variables);

    match model.generate(&prompt, image).await {
        Ok(text) => {
            let records = normalize::normalize_response(&text);
            info!(records = records.len(), "image analyzed");
            records
        }
        Err(e) => {
            warn!(error = %e, "model call failed, returning no records");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct Canned {
        reply: Result<&'static str, u16>,
        seen_prompt: Mutex<Option<String>>,
    }

    #[async_trait]
    impl VisionModel for Canned {
        async fn generate(&self, prompt: &str, _image: &DecodedImage) -> Result<String, AiError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(AiError::Upstream {
                    status,
                    body: "quota exceeded".into(),
                }),
            }
        }
    }

    fn image() -> DecodedImage {
        DecodedImage {
            mime_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn upstream_failure_is_empty() {
        let model = Canned {
            reply: Err(429),
            seen_prompt: Mutex::new(None),
        };
        let out = analyze_image(&model, &image(), &Map::new()).await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn variables_reach_the_prompt() {
        let model = Canned {
            reply: Ok("[{'expr': 'x + 1', 'result': 6}]"),
            seen_prompt: Mutex::new(None),
        };
        let Value::Object(vars) = json!({"x": 5}) else { unreachable!() };

        let out = analyze_image(&model, &image(), &vars).await;

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].expr, "x + 1");
        let prompt = model.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains(r#"{"x":5}"#));
    }

    #[test]
    fn cfg_requires_api_key() {
        assert!(matches!(
            GeminiCfg::from_lookup(|_| None),
            Err(AiError::MissingApiKey)
        ));
        assert!(matches!(
            GeminiCfg::from_lookup(|k| (k == "GEMINI_API_KEY").then(|| "  ".to_string())),
            Err(AiError::MissingApiKey)
        ));
    }

    #[test]
    fn cfg_defaults_and_redacted_debug() {
        let cfg = GeminiCfg::from_lookup(|k| (k == "GEMINI_API_KEY").then(|| "secret".to_string()))
            .unwrap();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(!format!("{cfg:?}").contains("secret"));
    }
}
