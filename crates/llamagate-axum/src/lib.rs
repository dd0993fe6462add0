#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

pub use bootstrap::{GatewayContext, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;

// Silence unused dev-dependency warnings from the integration test stack
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use hyper as _;
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use tower as _;
