//! Typed request payloads for the upstream daemon.
//!
//! Each operation gets its own tagged type with the fields the gateway
//! cares about spelled out and everything else carried through a flattened
//! map, so daemon options (`options`, `keep_alive`, `insecure`, ...) pass
//! through unaltered. Older daemons use `name` where newer ones accept
//! `model`; the aliases below take either and re-serialize as the
//! backward-compatible form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model to run.
    pub model: String,
    /// Prompt text. Absent means "just load the model" to the daemon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Caller's streaming wish. Passed through on the native surface,
    /// overridden to `false` by the dialect translator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Unrecognized fields, forwarded verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `system`, `user`, or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
    /// Unrecognized fields (images, tool calls), forwarded verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model to run.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatTurn>,
    /// Caller's streaming wish; see [`GenerateRequest::stream`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Unrecognized fields, forwarded verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /api/pull`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Model name to fetch.
    #[serde(alias = "model")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /api/push`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushRequest {
    /// Model name to publish.
    #[serde(alias = "model")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /api/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateModelRequest {
    /// Name of the model to create.
    #[serde(alias = "model")]
    pub name: String,
    /// Modelfile contents, when supplied inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modelfile: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `DELETE /api/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// Name of the model to remove.
    #[serde(alias = "model")]
    pub name: String,
}

/// Body for `POST /api/show`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowRequest {
    /// Name of the model to describe.
    #[serde(alias = "model")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_keeps_unknown_fields() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"model":"llama2","prompt":"hi","temperature":0.2,"options":{"seed":7}}"#,
        )
        .unwrap();

        assert_eq!(req.model, "llama2");
        assert_eq!(req.prompt.as_deref(), Some("hi"));
        assert!(req.extra.contains_key("temperature"));

        let out = serde_json::to_value(&req).unwrap();
        assert_eq!(out["options"]["seed"], 7);
    }

    #[test]
    fn test_delete_request_accepts_model_alias() {
        let req: DeleteRequest = serde_json::from_str(r#"{"model":"llama2"}"#).unwrap();
        assert_eq!(req.name, "llama2");

        // Re-serializes as the backward-compatible field
        let out = serde_json::to_value(&req).unwrap();
        assert_eq!(out["name"], "llama2");
        assert!(out.get("model").is_none());
    }

    #[test]
    fn test_chat_turn_round_trip() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"model":"m","messages":[{"role":"user","content":"hello","images":["abc"]}]}"#,
        )
        .unwrap();

        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].content, "hello");
        let out = serde_json::to_value(&req).unwrap();
        assert_eq!(out["messages"][0]["images"][0], "abc");
    }
}
