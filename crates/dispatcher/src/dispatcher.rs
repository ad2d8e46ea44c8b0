use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use pingmesh_common::TimeoutUtils;
use pingmesh_domain::entities::{Subscription, Task, TaskStatus};
use pingmesh_domain::messages::build_task_message;
use pingmesh_domain::messaging::TaskPublisher;
use pingmesh_domain::repositories::{SensorRankRepository, SubscriptionRepository, TaskRepository};
use pingmesh_errors::{SchedulerError, SchedulerResult};

use crate::opts::subscription_task_opts;

/// 调度工作器
///
/// 每次触发把到期订阅与当前评分最优的传感器配对。传感器列表按
/// `rank - 近 10 分钟任务数` 降序给出，订阅按 `i mod K` 轮转选择，
/// 订阅多于传感器时从头复用。
pub struct TaskDispatcher {
    subscription_repo: Arc<dyn SubscriptionRepository>,
    task_repo: Arc<dyn TaskRepository>,
    sensor_rank_repo: Arc<dyn SensorRankRepository>,
    publisher: Arc<dyn TaskPublisher>,
    task_channel: String,
    db_timeout: Duration,
    publish_timeout: Duration,
}

impl TaskDispatcher {
    pub fn new(
        subscription_repo: Arc<dyn SubscriptionRepository>,
        task_repo: Arc<dyn TaskRepository>,
        sensor_rank_repo: Arc<dyn SensorRankRepository>,
        publisher: Arc<dyn TaskPublisher>,
        task_channel: String,
        db_timeout: Duration,
        publish_timeout: Duration,
    ) -> Self {
        Self {
            subscription_repo,
            task_repo,
            sensor_rank_repo,
            publisher,
            task_channel,
            db_timeout,
            publish_timeout,
        }
    }

    /// 执行一次调度
    pub async fn run_pass(&self) {
        info!("调度触发...");
        let now = Utc::now();

        let pending = match TimeoutUtils::custom(
            self.subscription_repo.get_due(now),
            self.db_timeout,
            "get_due_subscriptions",
        )
        .await
        {
            Ok(pending) => pending,
            Err(e) => {
                error!("查询到期订阅失败: {}", e);
                return;
            }
        };

        info!("发现 {} 个到期订阅", pending.len());
        if pending.is_empty() {
            return;
        }

        let sensors = match TimeoutUtils::custom(
            self.sensor_rank_repo.get_ranked_active(),
            self.db_timeout,
            "get_ranked_active_sensors",
        )
        .await
        {
            Ok(sensors) => sensors,
            Err(e) => {
                error!("查询可用传感器失败: {}", e);
                return;
            }
        };

        // 后续取模运算要求列表非空
        if sensors.is_empty() {
            error!("没有可用的已评分传感器");
            return;
        }

        for (i, subscription) in pending.iter().enumerate() {
            // 订阅多于传感器时按轮转复用
            let sensor_id = sensors[i % sensors.len()];

            if let Err(e) = self.initiate_task(subscription, sensor_id).await {
                error!("任务初始化失败: {}", e);
                continue;
            }
        }
    }

    /// 为 (订阅, 传感器) 组合初始化一个任务。
    ///
    /// 任意一步失败都中止该任务的初始化并上报；已持久化的 Initiated
    /// 记录不回滚，由外部的清理机制回收。
    async fn initiate_task(
        &self,
        subscription: &Subscription,
        sensor_id: Uuid,
    ) -> SchedulerResult<()> {
        let task_opts = subscription_task_opts(subscription)?;
        let task = Task::new(subscription, sensor_id, task_opts);

        TimeoutUtils::custom(self.task_repo.create(&task), self.db_timeout, "create_task").await?;

        let payload = build_task_message(&task)?;

        info!("发布任务 task_id: {}, sensor_id: {}", task.id, task.sensor_id);

        let receiver_count = TimeoutUtils::custom(
            self.publisher.publish(&self.task_channel, &payload),
            self.publish_timeout,
            "publish_task",
        )
        .await?;

        if receiver_count == 0 {
            // 没有任何接收者，任务保持 Initiated，等待上层回收后重新调度
            return Err(SchedulerError::NoSubscribers {
                task_id: task.id,
                sensor_id: task.sensor_id,
            });
        }

        TimeoutUtils::custom(
            self.task_repo.update_status(task.id, TaskStatus::Published),
            self.db_timeout,
            "update_task_status",
        )
        .await?;

        Ok(())
    }
}
