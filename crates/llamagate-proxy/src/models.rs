//! OpenAI API data models for the compatibility surface.
//!
//! These types match the subset of the OpenAI API specification this
//! gateway exposes. Native daemon types live in `llamagate-core`; the
//! mapping between the two lives in [`crate::openai`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Completion Request/Response Types
// =============================================================================

/// Request to /v1/completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    /// Model name to use.
    pub model: String,
    /// Prompt text.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Streaming wish. Accepted for compatibility and always overridden:
    /// this surface only answers complete responses.
    #[serde(default)]
    pub stream: bool,
}

/// Response from /v1/completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    pub usage: Usage,
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    pub index: u32,
    /// Always serialized as `null`; kept for wire-shape compatibility.
    pub logprobs: Option<Value>,
    pub finish_reason: String,
}

// =============================================================================
// Chat Completion Request/Response Types
// =============================================================================

/// Request to /v1/chat/completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name to use.
    pub model: String,
    /// Array of chat messages.
    pub messages: Vec<ChatMessage>,
    /// Streaming wish; see [`CompletionRequest::stream`].
    #[serde(default)]
    pub stream: bool,
}

/// A single chat message.
///
/// Only role and content are interpreted; any other fields (images, tool
/// payloads) ride along to the daemon untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,
    /// Message content.
    #[serde(default)]
    pub content: Option<String>,
    /// Unrecognized fields, forwarded verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from /v1/chat/completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

/// A single chat completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatReply,
    pub finish_reason: String,
}

/// Assistant message within a chat choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub role: String,
    pub content: String,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

// =============================================================================
// Models Endpoint Types
// =============================================================================

/// Response from /v1/models endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

/// Information about a single model (OpenAI format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    /// Synthesized at translation time; not a real creation timestamp.
    pub created: i64,
    pub owned_by: String,
}
