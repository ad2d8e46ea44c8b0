//! 领域仓储抽象
//!
//! 定义数据访问的抽象接口，遵循依赖倒置原则

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{HostRuntimeStat, SensorRank, SensorTaskStamp, Subscription, Task, TaskStatus};
use pingmesh_errors::SchedulerResult;

/// 订阅仓储抽象
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// 查询在 `now` 时刻到期的活跃订阅
    async fn get_due(&self, now: DateTime<Utc>) -> SchedulerResult<Vec<Subscription>>;
}

/// 任务仓储抽象
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &Task) -> SchedulerResult<()>;
    async fn update_status(&self, id: Uuid, status: TaskStatus) -> SchedulerResult<()>;
    /// 每个传感器最近一次任务的创建时间
    async fn get_latest_per_sensor(
        &self,
        sensor_ids: &[Uuid],
    ) -> SchedulerResult<Vec<SensorTaskStamp>>;
}

/// 运行时状态样本仓储抽象
#[async_trait]
pub trait RuntimeStatRepository: Send + Sync {
    /// 窗口内指定传感器的运行时状态样本，按时间升序
    async fn get_recent(
        &self,
        window_minutes: i64,
        sensor_ids: &[Uuid],
    ) -> SchedulerResult<Vec<HostRuntimeStat>>;
}

/// 传感器评分仓储抽象
#[async_trait]
pub trait SensorRankRepository: Send + Sync {
    /// 单批次写入一次评分产出的全部快照
    async fn insert_batch(&self, ranks: &[SensorRank]) -> SchedulerResult<()>;
    /// 调度排序视图：近 60 分钟内每个传感器的最新快照，rank > 0，
    /// 按 (rank - 近 10 分钟任务数) 降序，传感器标识升序决胜
    async fn get_ranked_active(&self) -> SchedulerResult<Vec<Uuid>>;
}
