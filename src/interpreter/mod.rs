//! Turns a chat message into concrete slot queries.
//!
//! Messages already in the direct form (`2025-04-25 19:00-22:00 1.5h`) are
//! parsed locally. Everything else goes to an OpenAI-compatible
//! chat-completions endpoint that answers with a JSON array of slot objects.

pub mod direct;
pub mod prompt;

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slots::{merge_slots, RawSlotQuery, SlotQuery};
use crate::utils::logging::log_llm_call;

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("language model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("language model answered with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("language model returned an empty reply")]
    EmptyReply,

    #[error("could not read the language model reply: {0}")]
    Malformed(String),

    #[error("no usable date or time range in the request")]
    NothingUsable,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
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

#[derive(Clone)]
pub struct QueryInterpreter {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    default_duration_hours: f64,
}

impl QueryInterpreter {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        default_duration_hours: f64,
    ) -> Result<Self, InterpretError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_duration_hours,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Interprets `text` relative to `today` and returns merged, normalised queries.
    pub async fn interpret(&self, text: &str, today: NaiveDate) -> Result<Vec<SlotQuery>, InterpretError> {
        let raw = match direct::parse_direct(text) {
            Some(raw) => {
                tracing::debug!("Query in direct form, skipping language model");
                raw
            }
            None => self.ask_model(text, today).await?,
        };

        self.finish(raw, today)
    }

    /// Normalises raw queries, dropping unusable ones, and merges overlapping windows.
    pub fn finish(&self, raw: Vec<RawSlotQuery>, today: NaiveDate) -> Result<Vec<SlotQuery>, InterpretError> {
        let queries: Vec<SlotQuery> = raw
            .iter()
            .filter_map(|r| r.normalize(today, self.default_duration_hours))
            .collect();

        let merged = merge_slots(queries);
        if merged.is_empty() {
            return Err(InterpretError::NothingUsable);
        }
        Ok(merged)
    }

    async fn ask_model(&self, text: &str, today: NaiveDate) -> Result<Vec<RawSlotQuery>, InterpretError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt::system_prompt(today),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        };

        log_llm_call(&self.model, "request", None);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_llm_call(&self.model, "failed", Some(status.as_str()));
            return Err(InterpretError::Api { status, body });
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(InterpretError::EmptyReply)?;

        log_llm_call(&self.model, "reply", Some(&format!("{} chars", content.len())));
        parse_reply(&content)
    }
}

/// Decodes the JSON array embedded in a model reply, ignoring any text
/// around it.
pub fn parse_reply(content: &str) -> Result<Vec<RawSlotQuery>, InterpretError> {
    let array = extract_json_array(content)
        .ok_or_else(|| InterpretError::Malformed("no JSON array in reply".to_string()))?;

    serde_json::from_str(array).map_err(|e| {
        tracing::warn!("Unreadable model reply: {}", content);
        InterpretError::Malformed(e.to_string())
    })
}

fn extract_json_array(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}
