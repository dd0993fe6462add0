//! Upstream daemon port definitions.
//!
//! This module defines the port trait, DTOs, and error type for talking to
//! the model-serving daemon. The reqwest implementation lives in
//! `llamagate-proxy`.

mod client;
mod error;
mod types;

pub use client::{UpstreamPort, UpstreamReply};
pub use error::{UpstreamError, UpstreamResult};
pub use types::{
    ChatRequest, ChatTurn, CreateModelRequest, DeleteRequest, GenerateRequest, PullRequest,
    PushRequest, ShowRequest,
};
