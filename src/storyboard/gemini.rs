use std::time::Duration;

use reqwest::blocking::Client;

use crate::storyboard::{
    GeneratorConfig, Storyboard, StoryboardError, StoryboardGenerator, StoryboardOutput,
    storyboard_prompt,
};

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(serde::Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(serde::Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Request body for `prompt`.
pub(crate) fn request_body(
    prompt: &str,
    structured: bool,
) -> Result<serde_json::Value, serde_json::Error> {
    let req = GenerateRequest {
        contents: [RequestContent {
            parts: [RequestPart { text: prompt }],
        }],
        generation_config: structured.then_some(GenerationConfig {
            response_mime_type: "application/json",
        }),
    };
    serde_json::to_value(req)
}

/// Extract the model text from a `generateContent` response body.
pub(crate) fn parse_response(body: &str, structured: bool) -> Result<StoryboardOutput, StoryboardError> {
    let resp: GenerateResponse = serde_json::from_str(body)?;
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(StoryboardError::EmptyResponse);
    }
    if structured {
        let board: Storyboard = serde_json::from_str(&text)?;
        return Ok(StoryboardOutput::Structured(board));
    }
    Ok(StoryboardOutput::Raw(text))
}

/// Blocking client for the Gemini `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client. Fails without an API key.
    pub fn new(config: &GeneratorConfig) -> Result<Self, StoryboardError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(StoryboardError::MissingApiKey)?;
        let http = Client::builder()
            .timeout(if config.timeout.is_zero() {
                Duration::from_secs(60)
            } else {
                config.timeout
            })
            .build()?;
        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Endpoint URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl StoryboardGenerator for GeminiClient {
    #[tracing::instrument(skip_all, fields(model = %self.model, chars = text.chars().count(), structured = structured))]
    fn generate(&self, text: &str, structured: bool) -> Result<StoryboardOutput, StoryboardError> {
        let body = request_body(&storyboard_prompt(text), structured)?;
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;
        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(StoryboardError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        tracing::debug!(bytes = text.len(), "storyboard response received");
        parse_response(&text, structured)
    }
}
