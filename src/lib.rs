pub mod api;
pub mod config;
pub mod db;
pub mod rating;
pub mod services;
pub mod stormglass;
pub mod stormglass_error;
