use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::db::{Beach, NewBeach};
use crate::services::forecast_service::TimeForecast;
use crate::services::{BeachService, ForecastService};

#[derive(Clone)]
pub struct AppState {
    pub beach_service: BeachService,
    pub forecast_service: ForecastService,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/beaches", post(create_beach).get(get_beaches))
        .route("/forecast", get(get_forecast))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

/// Token verification happens upstream; the verified caller identity reaches
/// this service as an `x-user-id` header.
fn user_id_from_headers(headers: &HeaderMap) -> Result<Uuid, StatusCode> {
    let value = headers.get("x-user-id").ok_or_else(|| {
        warn!("Request without x-user-id header");
        StatusCode::UNAUTHORIZED
    })?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| {
            warn!("Request with malformed x-user-id header");
            StatusCode::UNAUTHORIZED
        })
}

#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

#[instrument(skip(state, headers, beach), fields(name = %beach.name))]
async fn create_beach(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(beach): Json<NewBeach>,
) -> Result<(StatusCode, Json<Beach>), StatusCode> {
    let user_id = user_id_from_headers(&headers)?;
    debug!("Creating beach for user {}", user_id);

    let created = state
        .beach_service
        .create_beach(user_id, &beach)
        .await
        .map_err(|e| {
            error!("Failed to create beach for user {}: {}", user_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Created beach {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, headers))]
async fn get_beaches(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Beach>>, StatusCode> {
    let user_id = user_id_from_headers(&headers)?;
    debug!("Listing beaches for user {}", user_id);

    let beaches = state
        .beach_service
        .beaches_for_user(user_id)
        .await
        .map_err(|e| {
            error!("Failed to list beaches for user {}: {}", user_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!("Retrieved {} beaches for user {}", beaches.len(), user_id);
    Ok(Json(beaches))
}

#[instrument(skip(state, headers))]
async fn get_forecast(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TimeForecast>>, StatusCode> {
    let user_id = user_id_from_headers(&headers)?;
    debug!("Computing forecast for user {}", user_id);

    let beaches = state
        .beach_service
        .beaches_for_user(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load beaches for user {}: {}", user_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let forecast = state
        .forecast_service
        .process_forecast_for_beaches(&beaches)
        .await
        .map_err(|e| {
            error!("Failed to process forecast for user {}: {}", user_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    info!(
        "Computed forecast for user {}: {} time buckets across {} beaches",
        user_id,
        forecast.len(),
        beaches.len()
    );
    Ok(Json(forecast))
}
