pub mod beach_service;
pub mod forecast_service;

pub use beach_service::BeachService;
pub use forecast_service::ForecastService;
