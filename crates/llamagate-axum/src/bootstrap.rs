//! Gateway bootstrap - the composition root.
//!
//! The only place where infrastructure is wired together: database pool,
//! repositories, credential verifier, admin service, session store and
//! upstream client are all instantiated here.

use std::sync::Arc;

use anyhow::Result;
use llamagate_core::auth::{TokenSigner, generate_signing_secret};
use llamagate_core::{
    AdminService, CredentialVerifier, GatewayConfig, MemorySessionStore, Repos, SessionStore,
    UpstreamPort,
};
use llamagate_db::{RepoFactory, setup_database};
use llamagate_proxy::OllamaClient;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Operator account seeded on first start.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Its well-known initial password. The startup log nags until changed.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// How many successive ports the listener tries when the configured one is
/// taken.
const PORT_WALK_LIMIT: u16 = 16;

/// Application context for the HTTP adapter.
///
/// Handlers reach everything through this struct (Arc-wrapped as
/// [`crate::state::AppState`]).
pub struct GatewayContext {
    /// Credential checks and token minting.
    pub verifier: CredentialVerifier,
    /// User/key administration and dashboard aggregates.
    pub admin: AdminService,
    /// Browser session store.
    pub sessions: Arc<dyn SessionStore>,
    /// Forwarder to the model daemon.
    pub upstream: Arc<dyn UpstreamPort>,
    /// Repository handles, used directly for usage-log writes.
    pub repos: Repos,
    /// Browser session lifetime; doubles as the cookie Max-Age.
    pub session_ttl: chrono::Duration,
}

/// Wire every service from configuration.
pub async fn bootstrap(config: &GatewayConfig) -> Result<GatewayContext> {
    // 1. Database pool with full schema setup
    let pool = setup_database(&config.database_path).await?;
    let repos = RepoFactory::build_repos(pool);

    // 2. Token signer, from the configured secret or an ephemeral one
    let signer = match &config.secret_key {
        Some(secret) => TokenSigner::new(secret, config.access_token_ttl),
        None => {
            warn!("SECRET_KEY not set; tokens are signed with a generated secret and die with the process");
            TokenSigner::new(&generate_signing_secret(), config.access_token_ttl)
        }
    };

    // 3. Services over the repository seams
    let verifier = CredentialVerifier::new(repos.users.clone(), repos.api_keys.clone(), signer);
    let admin = AdminService::new(repos.clone());
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

    // 4. Upstream client
    let upstream: Arc<dyn UpstreamPort> = Arc::new(OllamaClient::new(
        config.upstream_base_url.clone(),
        config.upstream_timeout,
    ));

    // 5. First-start seeding
    let created = admin
        .ensure_default_admin(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
        .await?;
    if created.is_some() && config.debug {
        info!(
            username = DEFAULT_ADMIN_USERNAME,
            password = DEFAULT_ADMIN_PASSWORD,
            "default admin credentials"
        );
    }

    info!(
        upstream = %config.upstream_base_url,
        database = %config.database_path.display(),
        "gateway context ready"
    );

    Ok(GatewayContext {
        verifier,
        admin,
        sessions,
        upstream,
        repos,
        session_ttl: config.session_ttl,
    })
}

/// Bootstrap and serve until a shutdown signal arrives.
pub async fn start_server(config: GatewayConfig) -> Result<()> {
    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx);

    let listener = bind_with_fallback(&config.host, config.port).await?;
    let addr = listener.local_addr()?;
    info!("llamagate listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Bind the configured port, walking forward when it is taken.
async fn bind_with_fallback(host: &str, port: u16) -> Result<TcpListener> {
    let mut candidate = port;
    for _ in 0..PORT_WALK_LIMIT {
        match TcpListener::bind((host, candidate)).await {
            Ok(listener) => {
                if candidate != port {
                    warn!(
                        configured = port,
                        chosen = candidate,
                        "configured port was taken, listening on a fallback"
                    );
                }
                return Ok(listener);
            }
            Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                debug!(port = candidate, "port in use, trying the next one");
                match candidate.checked_add(1) {
                    Some(next) => candidate = next,
                    None => break,
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
    anyhow::bail!(
        "no free port between {port} and {} on {host}",
        port.saturating_add(PORT_WALK_LIMIT - 1)
    )
}

/// Resolves when the process is asked to stop (Ctrl+C, or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}
