//! Completion-service client and normalizer
//!
//! Best-effort query structuring through an OpenAI-compatible
//! chat-completion endpoint: one bounded request per query, and any
//! failure collapses to the naive descriptor so normalization is never a
//! point of failure for the gateway.

use crate::config::LlmSettings;
use crate::network::HttpClient;
use crate::query::{parse_descriptor, Normalizer, SearchDescriptor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// System instruction constraining the completion to a pure JSON object
const SYSTEM_PROMPT: &str = "\
You are a travel assistant. From the user's question, extract search \
information and ALWAYS answer with a single pure JSON object of the form:

{
  \"query_text\": \"...\",
  \"location_hint\": \"...\",
  \"place_type\": \"restaurant\"
}

query_text is the main search text, e.g. \"tempat makan enak\". \
location_hint is the city or area, e.g. \"Jakarta\", and may be empty. \
place_type is the kind of place: restaurant, cafe, tourist_attraction, \
hotel, and so on. Send no text other than the JSON object.";

/// Failure modes of a completion attempt, collapsed before callers see them
#[derive(Debug, Error)]
enum LlmError {
    #[error("completion request failed: {0}")]
    Request(#[from] anyhow::Error),
    #[error("completion request timed out")]
    Timeout,
    #[error("completion service returned HTTP {0}")]
    Status(u16),
    #[error("completion response carried no content")]
    EmptyCompletion,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Normalizer backed by the external completion service
pub struct LlmNormalizer {
    client: HttpClient,
    settings: LlmSettings,
}

impl LlmNormalizer {
    pub fn new(client: HttpClient, settings: LlmSettings) -> Self {
        Self { client, settings }
    }

    /// Endpoint URL; the base carries no version path prefix
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }

    /// Single completion attempt, bounded by [`crate::COMPLETION_TIMEOUT`]
    async fn complete(&self, raw_query: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: raw_query,
                },
            ],
            temperature: 0.0,
        };

        let timeout = Duration::from_secs(crate::COMPLETION_TIMEOUT);
        let response = tokio::time::timeout(
            timeout,
            self.client.post_json_bearer(
                &self.endpoint(),
                &self.settings.api_key,
                &request,
                timeout,
            ),
        )
        .await
        .map_err(|_| LlmError::Timeout)??;

        if !response.is_success() {
            return Err(LlmError::Status(response.status));
        }

        let chat: ChatResponse = response.json()?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}

#[async_trait]
impl Normalizer for LlmNormalizer {
    async fn normalize(&self, raw_query: &str) -> SearchDescriptor {
        let content = match self.complete(raw_query).await {
            Ok(content) => content,
            Err(e) => {
                warn!("completion failed, using naive parse: {}", e);
                return SearchDescriptor::naive(raw_query);
            }
        };

        match parse_descriptor(&content, raw_query) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!("failed to parse completion content, using naive parse: {}", e);
                SearchDescriptor::naive(raw_query)
            }
        }
    }
}
