use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use pingmesh_domain::entities::{HostRuntimeStat, SensorTaskStamp};
use pingmesh_domain::messaging::SensorRegistry;
use pingmesh_domain::repositories::{RuntimeStatRepository, SensorRankRepository, TaskRepository};
use pingmesh_errors::SchedulerResult;

use crate::liveness::live_sensor_ids;
use crate::score::{calculate_sensor_ranks, ScoringWeights};

/// 一次评分所需的全部数据
#[derive(Debug, Default)]
struct RankData {
    runtime_stats: Vec<HostRuntimeStat>,
    last_sensor_tasks: Vec<SensorTaskStamp>,
}

/// 评分工作器
///
/// 每次触发：枚举存活传感器，拉取窗口内运行时样本与最近任务时间，
/// 计算评分并单批写入。所有错误都只影响本次触发，由下一次触发重试。
pub struct RankWorker {
    registry: Arc<dyn SensorRegistry>,
    runtime_stat_repo: Arc<dyn RuntimeStatRepository>,
    task_repo: Arc<dyn TaskRepository>,
    sensor_rank_repo: Arc<dyn SensorRankRepository>,
    window_minutes: i64,
    weights: ScoringWeights,
}

impl RankWorker {
    pub fn new(
        registry: Arc<dyn SensorRegistry>,
        runtime_stat_repo: Arc<dyn RuntimeStatRepository>,
        task_repo: Arc<dyn TaskRepository>,
        sensor_rank_repo: Arc<dyn SensorRankRepository>,
        window_minutes: i64,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            registry,
            runtime_stat_repo,
            task_repo,
            sensor_rank_repo,
            window_minutes,
            weights,
        }
    }

    /// 执行一次评分
    pub async fn run_pass(&self) {
        info!("评分触发...");

        let data = match self.collect_rank_data().await {
            Ok(data) => data,
            Err(e) => {
                error!("获取评分数据失败: {}", e);
                return;
            }
        };

        let ranks = calculate_sensor_ranks(
            &data.runtime_stats,
            &data.last_sensor_tasks,
            &self.weights,
            Utc::now(),
        );
        if ranks.is_empty() {
            warn!("评分结果为空，跳过本次写入");
            return;
        }

        if let Err(e) = self.sensor_rank_repo.insert_batch(&ranks).await {
            error!("写入评分快照失败: {}", e);
            return;
        }

        info!("本次评分完成，写入 {} 条快照", ranks.len());
    }

    async fn collect_rank_data(&self) -> SchedulerResult<RankData> {
        let sensor_ids = live_sensor_ids(self.registry.as_ref()).await?;
        info!("当前存活传感器: {} 个", sensor_ids.len());

        let runtime_stats = self
            .runtime_stat_repo
            .get_recent(self.window_minutes, &sensor_ids)
            .await?;
        let last_sensor_tasks = self.task_repo.get_latest_per_sensor(&sensor_ids).await?;

        Ok(RankData {
            runtime_stats,
            last_sensor_tasks,
        })
    }
}
