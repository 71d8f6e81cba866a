//! LLM API client for hosting recommendations

use std::fmt;
use std::str::FromStr;

use hostwiz_core::ParseChoiceError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AiError;
use crate::prompt::SYSTEM_PROMPT;

pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-2025-04-14";
pub const DEFAULT_ANTHROPIC_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;

/// Which LLM wire protocol to speak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Chat-completion protocol
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    /// Messages protocol
    Anthropic,
}

impl Backend {
    pub const ALL: &'static [Backend] = &[Backend::OpenAi, Backend::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::OpenAi => "openai",
            Backend::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Backend::OpenAi),
            "anthropic" => Ok(Backend::Anthropic),
            _ => Err(ParseChoiceError {
                field: "backend",
                value: s.trim().to_string(),
                expected: &["openai", "anthropic"],
            }),
        }
    }
}

/// Endpoint and model per backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub openai_base_url: String,
    pub openai_model: String,
    pub anthropic_base_url: String,
    pub anthropic_model: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            openai_base_url: DEFAULT_OPENAI_BASE.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
        }
    }
}

impl LlmSettings {
    /// Point both backends at the same host, as a mock server does in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            openai_base_url: base_url.clone(),
            anthropic_base_url: base_url,
            ..Self::default()
        }
    }
}

/// LLM client for generating recommendations.
///
/// Holds no credential: the caller passes one per request.
#[derive(Debug, Clone)]
pub struct LlmClient {
    settings: LlmSettings,
    client: reqwest::Client,
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new(LlmSettings::default())
    }
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Self {
        Self::with_http_client(settings, reqwest::Client::new())
    }

    /// Use a pre-built transport, e.g. one carrying a timeout.
    pub fn with_http_client(settings: LlmSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Send one prompt and return the assistant text.
    ///
    /// Exactly one HTTP attempt; every failure mode is a `RequestFailed`.
    pub async fn request(
        &self,
        prompt: &str,
        credential: &str,
        backend: Backend,
    ) -> Result<String, AiError> {
        match backend {
            Backend::OpenAi => self.call_openai(credential, prompt).await,
            Backend::Anthropic => self.call_anthropic(credential, prompt).await,
        }
    }

    async fn call_openai(&self, api_key: &str, prompt: &str) -> Result<String, AiError> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            model: &'a str,
            messages: Vec<OpenAIMessage<'a>>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Serialize)]
        struct OpenAIMessage<'a> {
            role: &'static str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            choices: Vec<OpenAIChoice>,
        }

        #[derive(Deserialize)]
        struct OpenAIChoice {
            message: OpenAIMessageContent,
        }

        #[derive(Deserialize)]
        struct OpenAIMessageContent {
            content: Option<String>,
        }

        let model = self.settings.openai_model.as_str();
        let request = OpenAIRequest {
            model,
            messages: vec![
                OpenAIMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                OpenAIMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let base_url = self.settings.openai_base_url.trim_end_matches('/');
        debug!(
            "Calling OpenAI-compatible API at {} with model: {}",
            base_url, model
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::RequestFailed(format!(
                "OpenAI API error ({}): {}",
                status, body
            )));
        }

        let response: OpenAIResponse = response.json().await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::RequestFailed("No response from OpenAI".to_string()))?;

        info!("Received response from OpenAI");
        Ok(content)
    }

    async fn call_anthropic(&self, api_key: &str, prompt: &str) -> Result<String, AiError> {
        #[derive(Serialize)]
        struct AnthropicRequest<'a> {
            model: &'a str,
            max_tokens: u32,
            messages: Vec<AnthropicMessage<'a>>,
        }

        #[derive(Serialize)]
        struct AnthropicMessage<'a> {
            role: &'static str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct AnthropicResponse {
            content: Vec<AnthropicContent>,
        }

        #[derive(Deserialize)]
        struct AnthropicContent {
            #[serde(default)]
            text: Option<String>,
        }

        let model = self.settings.anthropic_model.as_str();
        let request = AnthropicRequest {
            model,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let base_url = self.settings.anthropic_base_url.trim_end_matches('/');
        debug!("Calling Anthropic API at {} with model: {}", base_url, model);

        let response = self
            .client
            .post(format!("{}/v1/messages", base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::RequestFailed(format!(
                "Anthropic API error ({}): {}",
                status, body
            )));
        }

        let response: AnthropicResponse = response.json().await?;
        let content = response
            .content
            .into_iter()
            .next()
            .and_then(|c| c.text)
            .ok_or_else(|| AiError::RequestFailed("No response from Anthropic".to_string()))?;

        info!("Received response from Anthropic");
        Ok(content)
    }
}
