mod postgres_runtime_stat_repository;
mod postgres_sensor_rank_repository;
mod postgres_subscription_repository;
mod postgres_task_repository;

pub use postgres_runtime_stat_repository::PostgresRuntimeStatRepository;
pub use postgres_sensor_rank_repository::PostgresSensorRankRepository;
pub use postgres_subscription_repository::PostgresSubscriptionRepository;
pub use postgres_task_repository::PostgresTaskRepository;
