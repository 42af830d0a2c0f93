use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, instrument};

use crate::db::{Beach, BeachPosition};
use crate::rating::{RatingFactory, SurfRatingFactory};
use crate::stormglass::{ForecastPoint, StormGlassClient};
use crate::stormglass_error::StormGlassError;

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Unexpected error during the forecast processing: {0}")]
    Processing(String),
}

/// One normalized forecast point enriched with the identity and rating of
/// the beach it was fetched for. Request-scoped, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BeachForecast {
    pub name: String,
    pub position: BeachPosition,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
    #[serde(flatten)]
    pub point: ForecastPoint,
}

/// All enriched points sharing one timestamp, best rating first.
#[derive(Debug, Clone, Serialize)]
pub struct TimeForecast {
    pub time: String,
    pub forecast: Vec<BeachForecast>,
}

#[derive(Clone)]
pub struct ForecastService {
    storm_glass: StormGlassClient,
    rating_factory: Arc<dyn RatingFactory>,
}

impl ForecastService {
    pub fn new(storm_glass: StormGlassClient) -> Self {
        Self::with_rating_factory(storm_glass, Arc::new(SurfRatingFactory))
    }

    pub fn with_rating_factory(
        storm_glass: StormGlassClient,
        rating_factory: Arc<dyn RatingFactory>,
    ) -> Self {
        Self {
            storm_glass,
            rating_factory,
        }
    }

    /// Fetch, enrich and regroup forecast data for every beach, in input
    /// order. All-or-nothing: any provider failure aborts the whole request.
    #[instrument(skip(self, beaches), fields(beach_count = beaches.len()))]
    pub async fn process_forecast_for_beaches(
        &self,
        beaches: &[Beach],
    ) -> Result<Vec<TimeForecast>, ForecastError> {
        match self.calculate_rating(beaches).await {
            Ok(enriched) => {
                let mut grouped = Self::map_forecast_by_time(enriched);
                for bucket in &mut grouped {
                    // Stable sort, so rating ties keep beach input order.
                    bucket
                        .forecast
                        .sort_by(|a, b| b.rating.total_cmp(&a.rating));
                }
                Ok(grouped)
            }
            Err(err) => {
                error!("Forecast processing failed: {}", err);
                Err(ForecastError::Processing(err.to_string()))
            }
        }
    }

    async fn calculate_rating(&self, beaches: &[Beach]) -> Result<Vec<BeachForecast>, StormGlassError> {
        info!("Preparing the forecast for {} beaches", beaches.len());
        let mut enriched = Vec::new();
        for beach in beaches {
            let rating = self.rating_factory.for_beach(beach);
            let points = self.storm_glass.fetch_points(beach.lat, beach.lng).await?;
            enriched.extend(points.into_iter().map(|point| BeachForecast {
                name: beach.name.clone(),
                position: beach.position,
                lat: beach.lat,
                lng: beach.lng,
                rating: rating.rate_for_point(&point),
                point,
            }));
        }
        Ok(enriched)
    }

    /// Group by exact timestamp string, keeping the first-seen order of
    /// distinct timestamps.
    fn map_forecast_by_time(points: Vec<BeachForecast>) -> Vec<TimeForecast> {
        let mut grouped: Vec<TimeForecast> = Vec::new();
        for point in points {
            match grouped.iter_mut().find(|g| g.time == point.point.time) {
                Some(bucket) => bucket.forecast.push(point),
                None => grouped.push(TimeForecast {
                    time: point.point.time.clone(),
                    forecast: vec![point],
                }),
            }
        }
        grouped
    }
}
