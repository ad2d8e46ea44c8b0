pub mod models;
pub mod validation;

pub use models::{
    AppConfig, DatabaseConfig, DispatcherConfig, FinalWeightsConfig, RankerConfig, RegistryConfig,
    RuntimeWeightsConfig,
};

#[cfg(test)]
mod tests;
