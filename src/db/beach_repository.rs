use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::db::{Beach, BeachRow, DbError, NewBeach};

#[derive(Clone)]
pub struct BeachRepository {
    pool: PgPool,
}

impl BeachRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a beach for the given user and return the stored row.
    #[instrument(skip(self, beach), fields(name = %beach.name))]
    pub async fn insert(&self, user_id: Uuid, beach: &NewBeach) -> Result<Beach, DbError> {
        debug!("Inserting beach for user {}", user_id);

        let row = sqlx::query_as::<_, BeachRow>(
            r#"
            INSERT INTO beaches (name, position, lat, lng, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, position, lat, lng, user_id, created_at
            "#,
        )
        .bind(&beach.name)
        .bind(beach.position.as_str())
        .bind(beach.lat)
        .bind(beach.lng)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// All beaches owned by a user, oldest first.
    #[instrument(skip(self))]
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Beach>, DbError> {
        debug!("Querying beaches for user {}", user_id);

        let rows = sqlx::query_as::<_, BeachRow>(
            r#"
            SELECT id, name, position, lat, lng, user_id, created_at
            FROM beaches
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Beach::try_from).collect()
    }
}
