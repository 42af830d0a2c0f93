use uuid::Uuid;

use crate::db::{Beach, BeachRepository, DbError, NewBeach};

#[derive(Clone)]
pub struct BeachService {
    beach_repo: BeachRepository,
}

impl BeachService {
    pub fn new(beach_repo: BeachRepository) -> Self {
        Self { beach_repo }
    }

    pub async fn create_beach(&self, user_id: Uuid, beach: &NewBeach) -> Result<Beach, DbError> {
        self.beach_repo.insert(user_id, beach).await
    }

    pub async fn beaches_for_user(&self, user_id: Uuid) -> Result<Vec<Beach>, DbError> {
        self.beach_repo.find_by_user(user_id).await
    }
}
