use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use vitrina_api::resource::ResourceContext;

#[derive(Parser)]
#[command(name = "vitrina-server", about = "Vitrina in-memory resource server")]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(long, default_value = "vitrina.toml", env = "VITRINA_CONFIG")]
    config: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!(config = %cli.config, "loading configuration");
    let config = match vitrina_engine::config::VitrinaConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    tracing::info!(resources = config.resources.len(), "bootstrapping resources");
    let registry = match vitrina_engine::bootstrap::bootstrap(&config) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "failed to bootstrap resources");
            std::process::exit(1);
        }
    };

    // Freeze registry → Arc<dyn ResourceContext>
    let ctx: Arc<dyn ResourceContext> = Arc::new(registry);

    let port = config.effective_port();
    let static_dir = config.static_dir.clone().map(std::path::PathBuf::from);

    let token = CancellationToken::new();
    let api_token = token.clone();
    let api_handle = tokio::spawn(async move {
        if let Err(e) = vitrina_api_server::run(port, ctx, static_dir.as_deref(), api_token).await
        {
            tracing::error!(error = %e, "api server error");
        }
    });

    tracing::info!(port, "api server listening");
    tracing::info!("vitrina-server started, press Ctrl+C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down...");

    token.cancel();
    let _ = api_handle.await;

    tracing::info!("shutdown complete");
}
