//! Gateway binary. `serve` (the default) runs the HTTP gateway; the other
//! commands are one-shot administrative operations against the same
//! database, for bootstrapping credentials without the web UI.

use clap::Parser;
use llamagate_core::GatewayConfig;

mod commands;
mod ops;

use commands::{Cli, Commands};

/// Crates whose log output the default filter turns on.
const GATEWAY_TARGETS: &[&str] = &[
    "llamagate",
    "llamagate_core",
    "llamagate_db",
    "llamagate_proxy",
    "llamagate_axum",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env in the working directory feeds both the config and the
    // log filter, so it has to load before either is read.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = GatewayConfig::from_env()?;
    init_tracing(config.debug);

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            llamagate_axum::start_server(config).await
        }
        Commands::CreateUser { username, password } => {
            ops::create_user(&config.database_path, &username, &password).await
        }
        Commands::CreateKey { name } => ops::create_key(&config.database_path, &name).await,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the built-in filter.
fn init_tracing(debug: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(debug)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn default_filter(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    let mut directives: Vec<String> = GATEWAY_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    directives.push(format!(
        "tower_http={}",
        if debug { "debug" } else { "warn" }
    ));
    directives.join(",")
}
