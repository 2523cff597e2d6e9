mod api;
mod jobs;
mod middleware;

use adgen_completion::{CompletionClient, PollPolicy};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::jobs::Orchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = adgen_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = CompletionClient::from_config(&config)?;
    let orchestrator = Orchestrator::new(
        client,
        &config.completion_model,
        PollPolicy::from_config(&config),
    );
    let app = build_app(AppState { orchestrator });

    tracing::info!(addr = %config.bind_addr, env = %config.env, "adgen server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
