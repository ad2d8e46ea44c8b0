pub mod database;
pub mod registry;

pub use database::postgres::{
    PostgresRuntimeStatRepository, PostgresSensorRankRepository, PostgresSubscriptionRepository,
    PostgresTaskRepository,
};
pub use registry::{RedisConnectionManager, RedisRegistry};
