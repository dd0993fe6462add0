//! Command definitions for the gateway binary.

use clap::{Parser, Subcommand};

/// Authenticating API gateway in front of a local Ollama daemon.
#[derive(Parser)]
#[command(name = "llamagate")]
#[command(about = "API gateway with key management for a local Ollama daemon")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Running without one serves.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway (the default)
    Serve {
        /// Interface to listen on
        #[arg(long, env = "LLAMAGATE_HOST")]
        host: Option<String>,

        /// Preferred port; the listener walks forward when it is taken
        #[arg(short, long, env = "LLAMAGATE_PORT")]
        port: Option<u16>,
    },

    /// Create an operator account for the admin API and web UI
    CreateUser {
        /// Login name
        username: String,
        /// Password
        password: String,
    },

    /// Create an API key and print its secret
    CreateKey {
        /// Display name for the key
        #[arg(default_value = "default")]
        name: String,
    },
}
