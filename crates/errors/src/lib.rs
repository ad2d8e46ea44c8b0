use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("数据库读取错误: {0}")]
    StoreRead(String),
    #[error("数据库写入错误: {0}")]
    StoreWrite(String),
    #[error("注册表错误: {0}")]
    Registry(String),
    #[error("无效的传感器标识: {value}")]
    MalformedSensorId { value: String },
    #[error("发布错误: {0}")]
    Publish(String),
    #[error("没有订阅者接收任务: task_id={task_id}, sensor_id={sensor_id}")]
    NoSubscribers { task_id: Uuid, sensor_id: Uuid },
    #[error("未知的探测类型代码: {code}")]
    UnknownProbeType { code: i16 },
    #[error("序列化错误: {0}")]
    Serialization(String),
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("操作超时: {0}")]
    Timeout(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

impl SchedulerError {
    pub fn store_read<S: Into<String>>(msg: S) -> Self {
        Self::StoreRead(msg.into())
    }
    pub fn store_write<S: Into<String>>(msg: S) -> Self {
        Self::StoreWrite(msg.into())
    }
    pub fn registry_error<S: Into<String>>(msg: S) -> Self {
        Self::Registry(msg.into())
    }
    pub fn publish_error<S: Into<String>>(msg: S) -> Self {
        Self::Publish(msg.into())
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn timeout_error<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }
    /// 致命错误会终止进程，仅在启动阶段出现
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SchedulerError::Configuration(_) | SchedulerError::Internal(_)
        )
    }
    /// 可重试错误由下一次周期性触发自动重试
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SchedulerError::Database(_)
                | SchedulerError::StoreRead(_)
                | SchedulerError::StoreWrite(_)
                | SchedulerError::Registry(_)
                | SchedulerError::Publish(_)
                | SchedulerError::NoSubscribers { .. }
                | SchedulerError::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        SchedulerError::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for SchedulerError {
    fn from(err: redis::RedisError) -> Self {
        SchedulerError::Registry(err.to_string())
    }
}

impl From<anyhow::Error> for SchedulerError {
    fn from(err: anyhow::Error) -> Self {
        SchedulerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests;
