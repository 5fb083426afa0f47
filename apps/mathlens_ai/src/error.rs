use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("invalid upstream payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("upstream returned no text")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("data URL has no ',' between header and payload")]
    MissingComma,

    #[error("image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}
