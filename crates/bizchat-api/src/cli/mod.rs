//! CLI command definitions for the `bizchat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod status;

use clap::{Parser, Subcommand};

/// Small-business assistant chat service.
#[derive(Parser)]
#[command(name = "bizchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Export traces to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Host to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Apply pending database migrations and exit.
    Migrate,

    /// Show database and provider status.
    Status,
}
