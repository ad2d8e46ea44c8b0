use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use pingmesh_common::constants::REGISTRY_ACTIVE_SENSOR_PREFIX;
use pingmesh_domain::messaging::{SensorRegistry, TaskPublisher};
use pingmesh_errors::SchedulerResult;

use super::connection_manager::RedisConnectionManager;

/// 基于Redis的注册表客户端
///
/// 同时承担两个职责：枚举存活传感器的键，以及向新任务频道发布消息。
/// 内部连接可安全地被两个工作循环并发使用。
pub struct RedisRegistry {
    manager: Arc<RedisConnectionManager>,
}

impl RedisRegistry {
    pub fn new(manager: Arc<RedisConnectionManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl SensorRegistry for RedisRegistry {
    #[instrument(skip(self))]
    async fn active_sensor_keys(&self) -> SchedulerResult<Vec<String>> {
        // 存活键空间由传感器心跳维持，规模有界
        let mut cmd = redis::cmd("KEYS");
        cmd.arg(format!("{REGISTRY_ACTIVE_SENSOR_PREFIX}*"));
        let keys: Vec<String> = self.manager.execute_command(&cmd).await?;

        debug!("Registry returned {} active sensor keys", keys.len());
        Ok(keys)
    }
}

#[async_trait]
impl TaskPublisher for RedisRegistry {
    #[instrument(skip(self, payload), fields(payload_len = payload.len()))]
    async fn publish(&self, channel: &str, payload: &[u8]) -> SchedulerResult<i64> {
        let mut cmd = redis::cmd("PUBLISH");
        cmd.arg(channel).arg(payload);
        let receiver_count: i64 = self.manager.execute_command(&cmd).await?;

        debug!(
            "Published {} bytes to {}, received by {} subscribers",
            payload.len(),
            channel,
            receiver_count
        );
        Ok(receiver_count)
    }
}
