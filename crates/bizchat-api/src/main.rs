//! Bizchat CLI and REST API entry point.
//!
//! Binary name: `bizchat`
//!
//! Parses CLI arguments, initializes the database and services, then
//! dispatches to the appropriate command or starts the REST API server.

mod cli;
mod config;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    bizchat_observe::tracing_setup::init_tracing(cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let app_config = config::load()?;

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::init(app_config.clone()).await?;

            let host = host.unwrap_or(app_config.server.host);
            let port = port.unwrap_or(app_config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, "Bizchat API listening");
            println!("  Bizchat API listening on http://{addr}");
            println!("  Press Ctrl+C to stop");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Migrate => {
            // Opening the pool runs embedded migrations.
            let state = AppState::init(app_config).await?;
            drop(state);
            println!("  Migrations applied.");
        }

        Commands::Status => {
            let state = AppState::init(app_config).await?;
            cli::status::status(&state).await?;
        }
    }

    bizchat_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
