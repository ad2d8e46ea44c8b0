mod connection_manager;
mod redis_registry;

pub use connection_manager::RedisConnectionManager;
pub use redis_registry::RedisRegistry;
