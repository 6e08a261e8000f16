//! HTTP client for the hosted chat-completion endpoint.
//!
//! One POST per analysis request, bearer-authenticated, with an explicit
//! typed response schema. Non-2xx statuses and structurally wrong payloads
//! are distinct error variants; transport failures carry the reqwest error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Groq's OpenAI-compatible chat-completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model identifier sent when no override is configured.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Upstream had no timeout at all; 30s is a deliberate bound so a stalled
/// endpoint cannot hang an invocation indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response. Recovered locally and surfaced as display content.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    /// 2xx response whose payload does not carry `choices[0].message.content`.
    #[error("malformed completion payload: {0}")]
    Malformed(String),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Typed view of the completion response. Only the fields the flow consumes
/// are modeled.
#[derive(Deserialize)]
pub struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl ChatCompletion {
    /// Parse a 2xx response body into its first-choice content.
    pub fn parse_content(body: &str) -> Result<String, RemoteError> {
        let completion: ChatCompletion =
            serde_json::from_str(body).map_err(|e| RemoteError::Malformed(e.to_string()))?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| RemoteError::Malformed("no choices in response".into()))
    }
}

/// Client for the hosted analysis endpoint.
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl AnalysisClient {
    pub fn new(endpoint: String, model: String, api_key: String) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            model,
            api_key,
        })
    }

    /// Send one prompt and return the first-choice content.
    pub async fn complete(&self, prompt: &str) -> Result<String, RemoteError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        info!(endpoint = %self.endpoint, model = %self.model, "sending analysis request");
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let content = ChatCompletion::parse_content(&text)?;
        info!(chars = content.len(), "analysis received");
        Ok(content)
    }
}
