//! Image generation service protocol.
//!
//! The service is optional. Without an API key every request is a no-op that
//! yields no image; that is not an error. This module only builds requests
//! and interprets responses; the transport lives with the caller.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::{ImageSource, LoadError, SourceKind};

/// Default model for image generation.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Errors from the generation service.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The prompt was empty.
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// The response body was not the expected JSON.
    #[error("Malformed service response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The service answered with an error object.
    #[error("Generation service error {code}: {message}")]
    Service { code: i64, message: String },

    /// The service answered with a non-success status and no error object.
    #[error("Generation request failed with HTTP {status}")]
    Http { status: u16 },

    /// The inline image data was not valid base64.
    #[error("Invalid image payload encoding: {0}")]
    InvalidPayload(#[from] base64::DecodeError),

    /// The decoded payload is not a usable image.
    #[error("Generated image could not be loaded: {0}")]
    Load(#[from] LoadError),
}

/// Connection settings for the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl GenerationConfig {
    /// Config with the given key. Blank keys count as unconfigured.
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::default()
        }
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Whether requests can be made at all.
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// Full URL of the generate endpoint.
    pub fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Build the JSON request body for a prompt.
pub fn request_body(prompt: &str) -> Result<String, GenerateError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(GenerateError::EmptyPrompt);
    }
    let request = GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
    };
    Ok(serde_json::to_string(&request)?)
}

/// Interpret a response body.
///
/// Returns the first inline image of the first candidate, or `None` when the
/// response carries no image (for example a text-only answer).
pub fn parse_response(body: &str) -> Result<Option<ImageSource>, GenerateError> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(GenerateError::Service {
            code: error.code,
            message: error.message,
        });
    }

    let Some(content) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
    else {
        log::debug!("Generation response had no candidates");
        return Ok(None);
    };

    let Some(inline) = content.parts.into_iter().find_map(|part| part.inline_data) else {
        log::debug!("Generation response had no inline image");
        return Ok(None);
    };

    let bytes = STANDARD.decode(inline.data.trim())?;
    let mut source = ImageSource::from_bytes(&bytes)?;
    source.kind = SourceKind::Generated;
    Ok(Some(source))
}

/// Interpret a response body together with its HTTP status.
///
/// Success statuses are parsed as usual. For any other status the service's
/// own error object is reported when the body carries one; otherwise (an HTML
/// error page, an empty body) the status itself is the error.
pub fn parse_http_response(status: u16, body: &str) -> Result<Option<ImageSource>, GenerateError> {
    if (200..300).contains(&status) {
        return parse_response(body);
    }
    match parse_response(body) {
        Err(error @ GenerateError::Service { .. }) => Err(error),
        _ => Err(GenerateError::Http { status }),
    }
}
