#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod client;
pub mod models;
pub mod openai;

pub use client::OllamaClient;
