//! HTTP request handlers for the gateway surfaces.
//!
//! Each submodule covers one surface. Handlers are thin wrappers that
//! delegate to the core services and the upstream port.

pub mod admin;
pub mod native;
pub mod openai;
pub mod web;
