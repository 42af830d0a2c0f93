use std::collections::HashMap;

use chrono::{Duration, Utc};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::stormglass_error::StormGlassError;

/// The seven metrics requested from StormGlass, comma-joined exactly as the
/// provider expects them on the wire.
pub const STORMGLASS_API_PARAMS: &str =
    "swellDirection,swellHeight,swellPeriod,waveDirection,waveHeight,windDirection,windSpeed";

/// The single measurement source this service reads values from.
pub const STORMGLASS_API_SOURCE: &str = "noaa";

/// One raw hourly point as returned by StormGlass. Each metric is keyed by
/// source id, e.g. `"swellDirection": {"noaa": 64.26}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StormGlassPoint {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub wave_height: HashMap<String, f64>,
    #[serde(default)]
    pub wave_direction: HashMap<String, f64>,
    #[serde(default)]
    pub swell_direction: HashMap<String, f64>,
    #[serde(default)]
    pub swell_height: HashMap<String, f64>,
    #[serde(default)]
    pub swell_period: HashMap<String, f64>,
    #[serde(default)]
    pub wind_direction: HashMap<String, f64>,
    #[serde(default)]
    pub wind_speed: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StormGlassForecastResponse {
    pub hours: Vec<StormGlassPoint>,
}

/// The flattened form of one hourly point, every metric taken from the
/// single supported source. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub time: String,
    pub wave_height: f64,
    pub wave_direction: f64,
    pub swell_direction: f64,
    pub swell_height: f64,
    pub swell_period: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
}

#[derive(Clone)]
pub struct StormGlassClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl StormGlassClient {
    pub fn new(base_url: String, api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_token,
        }
    }

    /// Fetch and normalize the next 24 hours of forecast points for one
    /// geographic position. Coordinates are forwarded to the provider as-is.
    #[instrument(skip(self), fields(lat = %lat, lng = %lng))]
    pub async fn fetch_points(&self, lat: f64, lng: f64) -> Result<Vec<ForecastPoint>, StormGlassError> {
        let end_timestamp = (Utc::now() + Duration::days(1)).timestamp();
        let url = format!(
            "{}/weather/point?params={}&source={}&end={}&lat={}&lng={}",
            self.base_url, STORMGLASS_API_PARAMS, STORMGLASS_API_SOURCE, end_timestamp, lat, lng
        );

        debug!("Sending StormGlass request");
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.api_token.as_str())
            .send()
            .await
            .map_err(|e| StormGlassError::Request(e.to_string()))?;

        let status = response.status();
        debug!("Received StormGlass response with status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| StormGlassError::Request(e.to_string()))?;
            return Err(StormGlassError::Response {
                status: status.as_u16(),
                body,
            });
        }

        let payload: StormGlassForecastResponse = response
            .json()
            .await
            .map_err(|e| StormGlassError::Request(e.to_string()))?;

        Ok(Self::normalize_response(payload))
    }

    /// Order-preserving filter+map: points missing any metric for the
    /// supported source are dropped, the rest are flattened.
    fn normalize_response(payload: StormGlassForecastResponse) -> Vec<ForecastPoint> {
        payload
            .hours
            .into_iter()
            .filter_map(Self::normalize_point)
            .collect()
    }

    fn normalize_point(point: StormGlassPoint) -> Option<ForecastPoint> {
        Some(ForecastPoint {
            time: point.time?,
            wave_height: source_value(&point.wave_height)?,
            wave_direction: source_value(&point.wave_direction)?,
            swell_direction: source_value(&point.swell_direction)?,
            swell_height: source_value(&point.swell_height)?,
            swell_period: source_value(&point.swell_period)?,
            wind_direction: source_value(&point.wind_direction)?,
            wind_speed: source_value(&point.wind_speed)?,
        })
    }
}

/// Explicit presence check for the supported source. A reading of `0.0` is a
/// legitimate value and is kept; only absent or non-finite readings invalidate
/// the point.
fn source_value(metric: &HashMap<String, f64>) -> Option<f64> {
    metric
        .get(STORMGLASS_API_SOURCE)
        .copied()
        .filter(|v| v.is_finite())
}
