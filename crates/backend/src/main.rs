use chainfolio_backend::{AppState, app};
use chainfolio_core::{config::Config, telemetry};
use color_eyre::eyre::{Result, WrapErr as _};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    let filter = telemetry::env_filter(&config.log_level)?;
    telemetry::init_subscriber(telemetry::get_subscriber(filter))?;

    let aggregator = config.build_aggregator(config.http_client()?);
    let app = app(AppState::new(aggregator));

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!("🚀 chainfolio API server running at http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl-c: {}", e);
            }
            info!("received shutdown signal");
        })
        .await?;

    Ok(())
}
