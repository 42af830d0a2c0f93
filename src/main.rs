use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use surf_forecast_service::api::{create_router, AppState};
use surf_forecast_service::config::Config;
use surf_forecast_service::db::BeachRepository;
use surf_forecast_service::services::{BeachService, ForecastService};
use surf_forecast_service::stormglass::StormGlassClient;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,surf_forecast_service=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    info!("Starting surf forecast service on {}", config.server_addr());

    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    info!("Database connection established");

    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations completed");

    let beach_repo = BeachRepository::new(pool.clone());
    let beach_service = BeachService::new(beach_repo);

    let storm_glass = StormGlassClient::new(
        config.stormglass_api_url.clone(),
        config.stormglass_api_token.clone(),
    );
    let forecast_service = ForecastService::new(storm_glass);

    let app_state = AppState {
        beach_service,
        forecast_service,
    };
    let app = create_router(app_state).layer(TraceLayer::new_for_http());

    let addr = config.server_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
