//! OpenAI-compatible chat completion client
//!
//! Used twice: as a [`BiasValidator`] for AI-assisted scans, and by the
//! fix endpoint to rewrite text and summarise what changed.

use std::time::Duration;

use async_trait::async_trait;
use bias_engine::validation::{parse_findings, validation_prompt};
use bias_engine::{BiasValidator, ExternalFinding, ValidationError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const FIX_SYSTEM_PROMPT: &str = "You are a bias detection and correction expert. Your job is to \
rewrite text to remove all forms of bias including gender, racial, age, disability, cultural, \
political, religious, LGBTQ+, socioeconomic, intersectional bias, and offensive language & tone \
(profanity, slurs, hate speech, unprofessional language). Maintain the core message but use \
inclusive, neutral, and professional language. Be concise and professional.";

const IMPROVEMENTS_SYSTEM_PROMPT: &str =
    "List 3-5 specific improvements made to remove bias. Be brief and specific.";

const DEFAULT_IMPROVEMENTS: [&str; 3] = [
    "Removed biased language",
    "Used inclusive terminology",
    "Made text more neutral",
];

const MAX_IMPROVEMENTS: usize = 5;

/// Connection settings, usually read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl AiSettings {
    /// `OPENAI_API_KEY` or `AI_INTEGRATIONS_OPENAI_API_KEY`, with the matching
    /// `*_BASE_URL`. `None` when no key is set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|&name| lookup(name))
                .find(|value| !value.trim().is_empty())
        };

        let api_key = first(&["OPENAI_API_KEY", "AI_INTEGRATIONS_OPENAI_API_KEY"])?;
        let base_url = first(&["OPENAI_BASE_URL", "AI_INTEGRATIONS_OPENAI_BASE_URL"])
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Some(Self {
            api_key,
            base_url,
            model: DEFAULT_MODEL.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system",
            content: content.to_string(),
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Rewritten text plus a short list of what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub fixed_text: String,
    pub improvements: Vec<String>,
}

/// Thin client over `/chat/completions`
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    settings: AiSettings,
}

impl OpenAiClient {
    pub fn new(settings: AiSettings) -> Result<Self, ValidationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ValidationError::Transport(e.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Client configured from the environment, if a key is present
    pub fn from_env() -> Result<Option<Self>, ValidationError> {
        AiSettings::from_env().map(Self::new).transpose()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
        json_mode: bool,
    ) -> Result<String, ValidationError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages,
            temperature,
            max_tokens,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );
        let res = self
            .client
            .post(url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ValidationError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ValidationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = res
            .json()
            .await
            .map_err(|e| ValidationError::MalformedResponse(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| ValidationError::MalformedResponse("no message content".to_string()))
    }

    /// Rewrite `text` without bias, then ask for the list of improvements
    pub async fn fix_text(&self, text: &str) -> Result<FixOutcome, ValidationError> {
        let fixed_text = self
            .chat(
                vec![
                    ChatMessage::system(FIX_SYSTEM_PROMPT),
                    ChatMessage::user(format!(
                        "Rewrite this text to remove all biases and offensive language while \
                         preserving the core message:\n\n{text}"
                    )),
                ],
                0.7,
                500,
                false,
            )
            .await?;

        let improvements_text = self
            .chat(
                vec![
                    ChatMessage::system(IMPROVEMENTS_SYSTEM_PROMPT),
                    ChatMessage::user(format!(
                        "Original: {text}\n\nRevised: {fixed_text}\n\nList the key improvements:"
                    )),
                ],
                0.5,
                200,
                false,
            )
            .await?;

        Ok(FixOutcome {
            improvements: parse_improvements(&improvements_text),
            fixed_text,
        })
    }
}

#[async_trait]
impl BiasValidator for OpenAiClient {
    async fn validate(&self, text: &str) -> Result<Vec<ExternalFinding>, ValidationError> {
        let raw = self
            .chat(
                vec![ChatMessage::user(validation_prompt(text))],
                0.3,
                1000,
                true,
            )
            .await?;
        let findings = parse_findings(&raw)?;
        debug!(findings = findings.len(), "AI validation returned");
        Ok(findings)
    }
}

/// Split a model's bullet list into at most five plain lines
pub fn parse_improvements(raw: &str) -> Vec<String> {
    let improvements: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_start_matches(|c: char| "•-*123456789. ".contains(c)))
        .filter(|line| !line.is_empty())
        .take(MAX_IMPROVEMENTS)
        .map(str::to_string)
        .collect();

    if improvements.is_empty() {
        DEFAULT_IMPROVEMENTS.iter().map(|s| s.to_string()).collect()
    } else {
        improvements
    }
}
