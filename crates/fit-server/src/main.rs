use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{error, info};

use fit_api::{router, AppState};
use fit_infrastructure::{create_pool, HttpInsightsProvider, PgLogRepository, PgProfileRepository};
use fit_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    fit_shared::telemetry::init_telemetry();

    info!("Fit server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database connection established.");

    // Wire adapters and state at process start; handlers only ever see
    // injected references.
    let logs = Arc::new(PgLogRepository::new(pool.clone()));
    let profiles = Arc::new(PgProfileRepository::new(pool));
    let insights_provider = Arc::new(HttpInsightsProvider::new(&config.insights)?);

    let state = AppState::new(
        config.clone(),
        logs.clone(),
        logs.clone(),
        logs,
        profiles,
        insights_provider,
    );

    // Build router
    let app = router(state).layer(TraceLayer::new_for_http());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
