mod app_config;
mod database;
mod registry;
mod workers;

pub use app_config::AppConfig;
pub use database::DatabaseConfig;
pub use registry::RegistryConfig;
pub use workers::{DispatcherConfig, FinalWeightsConfig, RankerConfig, RuntimeWeightsConfig};
