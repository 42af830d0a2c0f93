use crate::db::{Beach, BeachPosition};
use crate::stormglass::ForecastPoint;

/// Scoring policy bound to one beach. Pure and infallible: every point gets
/// a rating.
pub trait RatingPolicy: Send + Sync {
    fn rate_for_point(&self, point: &ForecastPoint) -> f64;
}

/// Builds the policy for a given beach. Injected into the forecast service so
/// tests (or a future alternative formula) can swap the policy wholesale.
pub trait RatingFactory: Send + Sync {
    fn for_beach(&self, beach: &Beach) -> Box<dyn RatingPolicy>;
}

/// Default factory producing [`SurfRating`].
pub struct SurfRatingFactory;

impl RatingFactory for SurfRatingFactory {
    fn for_beach(&self, beach: &Beach) -> Box<dyn RatingPolicy> {
        Box::new(SurfRating::for_beach(beach))
    }
}

/// Default 1-5 rating: mean of the wind/wave alignment score, the swell
/// height band and the swell period band, rounded to the nearest integer.
pub struct SurfRating {
    beach_position: BeachPosition,
}

impl SurfRating {
    pub fn for_beach(beach: &Beach) -> Self {
        Self {
            beach_position: beach.position,
        }
    }

    pub fn rating_for_wind_and_wave_positions(
        &self,
        wave_position: BeachPosition,
        wind_position: BeachPosition,
    ) -> f64 {
        if wave_position == wind_position {
            // Onshore wind, blown-out conditions.
            1.0
        } else if self.is_wind_offshore(wave_position, wind_position) {
            5.0
        } else {
            // Cross winds.
            3.0
        }
    }

    pub fn rating_for_swell_period(&self, period: f64) -> f64 {
        if (7.0..10.0).contains(&period) {
            2.0
        } else if (10.0..14.0).contains(&period) {
            4.0
        } else if period >= 14.0 {
            5.0
        } else {
            1.0
        }
    }

    pub fn rating_for_swell_size(&self, height: f64) -> f64 {
        // Bands: ankle-to-knee, waist-high, head-high and above.
        if (0.3..1.0).contains(&height) {
            2.0
        } else if (1.0..2.0).contains(&height) {
            3.0
        } else if height >= 2.0 {
            5.0
        } else {
            1.0
        }
    }

    /// Maps a direction in degrees onto the cardinal quadrant it comes from.
    pub fn position_from_direction(&self, degrees: f64) -> BeachPosition {
        if degrees >= 310.0 || (0.0..50.0).contains(&degrees) {
            BeachPosition::North
        } else if (50.0..120.0).contains(&degrees) {
            BeachPosition::East
        } else if (120.0..220.0).contains(&degrees) {
            BeachPosition::South
        } else if (220.0..310.0).contains(&degrees) {
            BeachPosition::West
        } else {
            BeachPosition::East
        }
    }

    fn is_wind_offshore(&self, wave_position: BeachPosition, wind_position: BeachPosition) -> bool {
        matches!(
            (wave_position, wind_position, self.beach_position),
            (BeachPosition::North, BeachPosition::South, BeachPosition::North)
                | (BeachPosition::South, BeachPosition::North, BeachPosition::South)
                | (BeachPosition::East, BeachPosition::West, BeachPosition::East)
                | (BeachPosition::West, BeachPosition::East, BeachPosition::West)
        )
    }
}

impl RatingPolicy for SurfRating {
    fn rate_for_point(&self, point: &ForecastPoint) -> f64 {
        let wave_position = self.position_from_direction(point.swell_direction);
        let wind_position = self.position_from_direction(point.wind_direction);

        let wind_and_wave = self.rating_for_wind_and_wave_positions(wave_position, wind_position);
        let swell_height = self.rating_for_swell_size(point.swell_height);
        let swell_period = self.rating_for_swell_period(point.swell_period);

        ((wind_and_wave + swell_height + swell_period) / 3.0).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn beach(position: BeachPosition) -> Beach {
        Beach {
            id: Uuid::new_v4(),
            name: "Manly".to_string(),
            position,
            lat: -33.792726,
            lng: 151.289824,
            user_id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
        }
    }

    fn point(swell_direction: f64, swell_height: f64, swell_period: f64, wind_direction: f64) -> ForecastPoint {
        ForecastPoint {
            time: "2026-04-26T00:00:00+00:00".to_string(),
            wave_height: 0.47,
            wave_direction: 231.38,
            swell_direction,
            swell_height,
            swell_period,
            wind_direction,
            wind_speed: 100.0,
        }
    }

    #[test]
    fn test_rating_1_for_onshore_wind() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        let score = rating.rating_for_wind_and_wave_positions(BeachPosition::East, BeachPosition::East);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_rating_3_for_cross_wind() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        let score = rating.rating_for_wind_and_wave_positions(BeachPosition::East, BeachPosition::South);
        assert_eq!(score, 3.0);
    }

    #[test]
    fn test_rating_5_for_offshore_wind() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        let score = rating.rating_for_wind_and_wave_positions(BeachPosition::East, BeachPosition::West);
        assert_eq!(score, 5.0);
    }

    #[test]
    fn test_swell_period_bands() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        assert_eq!(rating.rating_for_swell_period(5.0), 1.0);
        assert_eq!(rating.rating_for_swell_period(9.0), 2.0);
        assert_eq!(rating.rating_for_swell_period(12.0), 4.0);
        assert_eq!(rating.rating_for_swell_period(16.0), 5.0);
    }

    #[test]
    fn test_swell_size_bands() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        assert_eq!(rating.rating_for_swell_size(0.2), 1.0);
        assert_eq!(rating.rating_for_swell_size(0.6), 2.0);
        assert_eq!(rating.rating_for_swell_size(1.5), 3.0);
        assert_eq!(rating.rating_for_swell_size(2.5), 5.0);
    }

    #[test]
    fn test_position_from_direction() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        assert_eq!(rating.position_from_direction(0.0), BeachPosition::North);
        assert_eq!(rating.position_from_direction(330.0), BeachPosition::North);
        assert_eq!(rating.position_from_direction(64.0), BeachPosition::East);
        assert_eq!(rating.position_from_direction(180.0), BeachPosition::South);
        assert_eq!(rating.position_from_direction(299.0), BeachPosition::West);
    }

    #[test]
    fn test_poor_conditions_rate_1() {
        // Onshore wind, tiny swell, short period.
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        let score = rating.rate_for_point(&point(100.0, 0.1, 5.0, 100.0));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_offshore_long_period_overhead_rates_5() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        let score = rating.rate_for_point(&point(64.0, 2.5, 16.0, 299.0));
        assert_eq!(score, 5.0);
    }

    #[test]
    fn test_offshore_waist_high_mid_period_rates_4() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::East));
        let score = rating.rate_for_point(&point(64.0, 1.5, 12.0, 299.0));
        assert_eq!(score, 4.0);
    }

    #[test]
    fn test_rating_is_deterministic() {
        let rating = SurfRating::for_beach(&beach(BeachPosition::North));
        let p = point(10.0, 0.8, 9.0, 180.0);
        assert_eq!(rating.rate_for_point(&p), rating.rate_for_point(&p));
    }
}
