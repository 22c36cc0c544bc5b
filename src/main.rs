use expense_tracker::config::Config;
use expense_tracker::server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expense_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        version = expense_tracker::VERSION,
        database = %config.database_path.display(),
        "Starting expense tracker on {}",
        config.address()
    );

    let host = config.host.clone();
    let port = config.port;
    let (_state, app) = server::build_app(config)?;

    let (actual_port, handle) = server::serve(app, &host, port).await?;
    tracing::info!("Listening on http://{}:{}", host, actual_port);
    tracing::info!("Health check: http://{}:{}/api/health", host, actual_port);

    handle.await??;
    Ok(())
}
