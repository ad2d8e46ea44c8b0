use redis::aio::MultiplexedConnection;
use redis::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use pingmesh_config::RegistryConfig;
use pingmesh_errors::{SchedulerError, SchedulerResult};

/// Redis连接管理器
///
/// 负责管理到注册表的连接，包括连接建立、重试机制和错误处理
pub struct RedisConnectionManager {
    client: Client,
    config: RegistryConfig,
}

impl RedisConnectionManager {
    /// 创建新的连接管理器
    pub async fn new(config: RegistryConfig) -> SchedulerResult<Self> {
        let redis_url = config.build_connection_url();
        let client = Client::open(redis_url).map_err(|e| {
            SchedulerError::registry_error(format!("Failed to create Redis client: {e}"))
        })?;

        let manager = Self { client, config };

        // 测试连接
        manager.ping().await?;
        debug!(
            "Successfully connected to Redis at {}:{}",
            manager.config.host, manager.config.port
        );

        Ok(manager)
    }

    /// 获取Redis连接
    pub async fn get_connection(&self) -> SchedulerResult<MultiplexedConnection> {
        self.get_connection_with_retry().await
    }

    /// 带重试机制的连接获取
    async fn get_connection_with_retry(&self) -> SchedulerResult<MultiplexedConnection> {
        let mut last_error = None;

        for attempt in 0..self.config.max_retry_attempts {
            match self.client.get_multiplexed_async_connection().await {
                Ok(conn) => {
                    if attempt > 0 {
                        debug!(
                            "Successfully reconnected to Redis after {} attempts",
                            attempt + 1
                        );
                    }
                    return Ok(conn);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.config.max_retry_attempts - 1 {
                        warn!(
                            "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}s...",
                            attempt + 1,
                            self.config.max_retry_attempts,
                            last_error.as_ref().unwrap(),
                            self.config.retry_delay_seconds
                        );
                        sleep(Duration::from_secs(self.config.retry_delay_seconds)).await;
                    }
                }
            }
        }

        let error_msg = format!(
            "Failed to connect to Redis after {} attempts. Last error: {}",
            self.config.max_retry_attempts,
            last_error.map_or("Unknown".to_string(), |e| e.to_string())
        );
        error!("{}", error_msg);
        Err(SchedulerError::registry_error(error_msg))
    }

    /// 执行Redis命令的通用方法
    pub async fn execute_command<T: redis::FromRedisValue>(
        &self,
        cmd: &redis::Cmd,
    ) -> SchedulerResult<T> {
        let mut conn = self.get_connection().await?;
        cmd.query_async(&mut conn)
            .await
            .map_err(|e| SchedulerError::registry_error(format!("Redis command failed: {e}")))
    }

    /// Ping Redis服务器
    pub async fn ping(&self) -> SchedulerResult<()> {
        let response: String = self.execute_command(&redis::cmd("PING")).await?;
        if response == "PONG" {
            debug!("Redis connection test successful");
            Ok(())
        } else {
            let error_msg = format!("Unexpected PING response: {response}");
            error!("{}", error_msg);
            Err(SchedulerError::registry_error(error_msg))
        }
    }

    /// 检查连接健康状态
    pub async fn health_check(&self) -> bool {
        match self.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Redis health check failed: {}", e);
                false
            }
        }
    }
}
