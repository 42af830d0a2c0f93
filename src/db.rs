pub mod beach_repository;
pub mod error;
pub mod models;

pub use beach_repository::BeachRepository;
pub use error::DbError;
pub use models::*;
