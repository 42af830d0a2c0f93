use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::DbError;

/// Which cardinal direction the beach faces. Stored as a single letter,
/// serialized the same way on the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeachPosition {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl BeachPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BeachPosition::North => "N",
            BeachPosition::East => "E",
            BeachPosition::South => "S",
            BeachPosition::West => "W",
        }
    }
}

impl FromStr for BeachPosition {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(BeachPosition::North),
            "E" => Ok(BeachPosition::East),
            "S" => Ok(BeachPosition::South),
            "W" => Ok(BeachPosition::West),
            other => Err(DbError::InvalidPosition(other.to_string())),
        }
    }
}

/// Persisted beach entity. Read-only from the forecast pipeline's
/// perspective.
#[derive(Debug, Clone, Serialize)]
pub struct Beach {
    pub id: Uuid,
    pub name: String,
    pub position: BeachPosition,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new beach.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBeach {
    pub name: String,
    pub position: BeachPosition,
    pub lat: f64,
    pub lng: f64,
}

/// Row shape as it comes out of Postgres; `position` is decoded from its
/// text column before the row becomes a [`Beach`].
#[derive(Debug, Clone, FromRow)]
pub struct BeachRow {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub lat: f64,
    pub lng: f64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BeachRow> for Beach {
    type Error = DbError;

    fn try_from(row: BeachRow) -> Result<Self, Self::Error> {
        Ok(Beach {
            position: row.position.parse()?,
            id: row.id,
            name: row.name,
            lat: row.lat,
            lng: row.lng,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}
