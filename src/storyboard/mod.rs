//! Novel-to-storyboard generation.
//!
//! The landing page only demos this, so the surface is small: one trait, a Gemini-backed client,
//! a canned mock and a wrapper that degrades to the mock when the upstream call fails.

pub(crate) mod gemini;
pub(crate) mod mock;

use std::time::Duration;

pub use gemini::GeminiClient;
pub use mock::{Fallback, MockStoryboard};

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Generative Language API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// One storyboard panel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// 1-based panel number.
    pub id: u32,
    /// What the panel shows.
    pub description: String,
    /// Spoken line or inner monologue.
    #[serde(default)]
    pub dialogue: String,
}

/// Ordered storyboard panels.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Storyboard {
    /// Panels in reading order.
    pub scenes: Vec<Scene>,
}

/// Generator result.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum StoryboardOutput {
    /// Parsed storyboard.
    Structured(Storyboard),
    /// Model text returned as-is.
    Raw(String),
}

/// Errors from storyboard generation.
#[derive(thiserror::Error, Debug)]
pub enum StoryboardError {
    /// No API key configured for a client that needs one.
    #[error("missing API key (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    /// Transport failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Malformed response or storyboard JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The model returned no text.
    #[error("empty response from model")]
    EmptyResponse,
}

/// Anything that turns novel text into a storyboard.
pub trait StoryboardGenerator {
    /// Generate a storyboard for `text`. With `structured`, the output is parsed into scenes.
    fn generate(&self, text: &str, structured: bool) -> Result<StoryboardOutput, StoryboardError>;
}

impl<G: StoryboardGenerator + ?Sized> StoryboardGenerator for Box<G> {
    fn generate(&self, text: &str, structured: bool) -> Result<StoryboardOutput, StoryboardError> {
        (**self).generate(text, structured)
    }
}

/// Prompt sent to the model for `text`.
pub fn storyboard_prompt(text: &str) -> String {
    format!(
        "Convert the following novel segment into a comic storyboard JSON with scene descriptions and dialogue: {text}"
    )
}

/// Storyboard client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// API key; `None` selects the mock.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// API root without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Simulated latency of the mock.
    pub mock_latency: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(60),
            mock_latency: Duration::ZERO,
        }
    }
}

impl GeneratorConfig {
    /// Read `GEMINI_API_KEY` (then `API_KEY`) and `GEMINI_MODEL` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GeneratorConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut cfg = Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            ..Self::default()
        };
        if let Some(model) = non_empty("GEMINI_MODEL") {
            cfg.model = model;
        }
        cfg
    }
}

/// The Gemini client behind a mock fallback when a key is configured, the mock otherwise.
pub fn generator_from_config(
    config: &GeneratorConfig,
) -> Result<Box<dyn StoryboardGenerator>, StoryboardError> {
    let mock = MockStoryboard::new(config.mock_latency);
    if config.api_key.is_none() {
        tracing::warn!("no Gemini API key configured; storyboards will be simulated");
        return Ok(Box::new(mock));
    }
    let client = GeminiClient::new(config)?;
    Ok(Box::new(Fallback::new(client, mock)))
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/storyboard.rs"]
mod tests;
