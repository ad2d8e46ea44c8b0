use async_trait::async_trait;

use pingmesh_errors::SchedulerResult;

/// Interface for the new-task fan-out channel
#[async_trait]
pub trait TaskPublisher: Send + Sync {
    /// 发布负载到指定频道，返回接收到消息的订阅者数量
    async fn publish(&self, channel: &str, payload: &[u8]) -> SchedulerResult<i64>;
}

/// Interface for the sensor liveness registry
#[async_trait]
pub trait SensorRegistry: Send + Sync {
    /// 返回注册表中所有存活传感器的键（带前缀，未经解析）
    async fn active_sensor_keys(&self) -> SchedulerResult<Vec<String>>;
}
