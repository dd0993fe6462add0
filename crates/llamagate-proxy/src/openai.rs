//! Translation between the OpenAI dialect and the native daemon dialect.
//!
//! Pure functions: requests map onto typed native payloads with streaming
//! forced off, native responses get wrapped into OpenAI envelopes with
//! synthesized ids and timestamps. Token counters that the daemon did not
//! report default to zero.

use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use llamagate_core::ports::upstream::{ChatRequest, ChatTurn, GenerateRequest};

use crate::models::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatReply,
    CompletionChoice, CompletionRequest, CompletionResponse, ModelInfo, ModelsResponse, Usage,
};

/// Map a native `/api/tags` body to the `/v1/models` envelope.
///
/// Entries without a `name` cannot be addressed by any follow-up call, so
/// they are dropped rather than emitted with an empty id.
pub fn models_response(native: &Value) -> ModelsResponse {
    let created = Utc::now().timestamp();
    let data = native
        .get("models")
        .and_then(Value::as_array)
        .map(|models| {
            models
                .iter()
                .filter_map(|m| m.get("name").and_then(Value::as_str))
                .map(|name| ModelInfo {
                    id: name.to_string(),
                    object: "model".to_string(),
                    created,
                    owned_by: "ollama".to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    ModelsResponse {
        object: "list".to_string(),
        data,
    }
}

/// Map a `/v1/completions` request to a native generate payload.
///
/// Only model and prompt travel upstream; sampling parameters this surface
/// does not understand are dropped, and streaming is forced off.
pub fn completion_request(req: CompletionRequest) -> GenerateRequest {
    GenerateRequest {
        model: req.model,
        prompt: req.prompt,
        stream: Some(false),
        extra: Map::new(),
    }
}

/// Wrap a native generate response in the `/v1/completions` envelope.
pub fn completion_response(model: &str, native: &Value) -> CompletionResponse {
    let text = native
        .get("response")
        .and_then(Value::as_str)
        .unwrap_or_default();

    CompletionResponse {
        id: synthesize_id("cmpl"),
        object: "text_completion".to_string(),
        created: Utc::now().timestamp(),
        model: model.to_string(),
        choices: vec![CompletionChoice {
            text: text.to_string(),
            index: 0,
            logprobs: None,
            finish_reason: "stop".to_string(),
        }],
        usage: usage(native),
    }
}

/// Map a `/v1/chat/completions` request to a native chat payload.
pub fn chat_request(req: ChatCompletionRequest) -> ChatRequest {
    ChatRequest {
        model: req.model,
        messages: req.messages.into_iter().map(chat_turn).collect(),
        stream: Some(false),
        extra: Map::new(),
    }
}

/// Wrap a native chat response in the `/v1/chat/completions` envelope.
///
/// Content resolution: a non-empty `message.content`, else the top-level
/// `response` field, else the empty string.
pub fn chat_response(model: &str, native: &Value) -> ChatCompletionResponse {
    let content = native
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .or_else(|| native.get("response").and_then(Value::as_str))
        .unwrap_or_default();

    ChatCompletionResponse {
        id: synthesize_id("chatcmpl"),
        object: "chat.completion".to_string(),
        created: Utc::now().timestamp(),
        model: model.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatReply {
                role: "assistant".to_string(),
                content: content.to_string(),
            },
            finish_reason: "stop".to_string(),
        }],
        usage: usage(native),
    }
}

fn chat_turn(message: ChatMessage) -> ChatTurn {
    ChatTurn {
        role: message.role,
        content: message.content.unwrap_or_default(),
        extra: message.extra,
    }
}

fn usage(native: &Value) -> Usage {
    let prompt_tokens = counter(native, "prompt_eval_count");
    let completion_tokens = counter(native, "eval_count");
    Usage {
        prompt_tokens,
        completion_tokens,
        total_tokens: prompt_tokens + completion_tokens,
    }
}

fn counter(native: &Value, field: &str) -> u64 {
    native.get(field).and_then(Value::as_u64).unwrap_or(0)
}

fn synthesize_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}
