//! Shared application state type.

use crate::bootstrap::GatewayContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped [`GatewayContext`] holding the verifier, the admin
/// service, the session store and the upstream client.
pub type AppState = Arc<GatewayContext>;
