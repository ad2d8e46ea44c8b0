//! 传感器评分函数
//!
//! 纯函数：相同输入产生相同输出，不访问时钟和任何外部状态。
//! 运行时评分衡量健康程度，轮换评分衡量空闲时长，两者按最终权重
//! 合成综合评分。

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use pingmesh_domain::entities::{HostRuntimeStat, SensorRank, SensorTaskStamp};

/// 工作单元负载归一化上限
const WORK_UNIT_CEILING: f64 = 66.0;

/// 运行时评分权重，三项之和为 1，默认偏向 CPU 与内存
#[derive(Debug, Clone, Copy)]
pub struct HostRuntimeWeights {
    pub cpu: f64,
    pub memory: f64,
    pub work_units: f64,
}

impl Default for HostRuntimeWeights {
    fn default() -> Self {
        Self {
            cpu: 0.4,
            memory: 0.4,
            work_units: 0.2,
        }
    }
}

/// 最终评分权重，两项之和为 1
#[derive(Debug, Clone, Copy)]
pub struct FinalRankWeights {
    pub runtime: f64,
    pub distribution: f64,
}

impl Default for FinalRankWeights {
    fn default() -> Self {
        Self {
            runtime: 1.0,
            distribution: 0.0,
        }
    }
}

/// 一次评分使用的全部权重参数
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub runtime: HostRuntimeWeights,
    pub final_rank: FinalRankWeights,
    /// 轮换评分 = multiplier * 距上次任务的分钟数
    pub distribution_multiplier: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            runtime: HostRuntimeWeights::default(),
            final_rank: FinalRankWeights::default(),
            distribution_multiplier: 1.0,
        }
    }
}

/// 单个传感器在一次评分过程中的聚合
#[derive(Debug, Clone, Copy, Default)]
pub struct RankEnvelope {
    pub runtime_rank: f64,
    pub distribution_rank: f64,
}

/// 单个运行时样本的评分
///
/// CPU 或内存达到 100% 视为满载，评分直接为 0。
fn runtime_rank(stat: &HostRuntimeStat, weights: &HostRuntimeWeights) -> f64 {
    if stat.cpu_usage_percent >= 100.0 || stat.mem_used_percent >= 100.0 {
        return 0.0;
    }
    let work_load = (stat.work_unit_count as f64 / WORK_UNIT_CEILING * 100.0).min(100.0);
    100.0
        - (weights.cpu * stat.cpu_usage_percent
            + weights.memory * stat.mem_used_percent
            + weights.work_units * work_load)
}

/// 将运行时评分并入信封，同一传感器后出现的样本覆盖先前的
fn add_runtime_rank(
    mut envelopes: HashMap<Uuid, RankEnvelope>,
    stats: &[HostRuntimeStat],
    weights: &HostRuntimeWeights,
) -> HashMap<Uuid, RankEnvelope> {
    for stat in stats {
        let rank = runtime_rank(stat, weights);
        envelopes.entry(stat.sensor_id).or_default().runtime_rank = rank;
    }
    envelopes
}

/// 将轮换评分并入信封，保证传感器轮换
///
/// 只更新已有运行时评分的传感器：没有运行时样本的传感器本次不可评分。
fn add_distribution_rank(
    mut envelopes: HashMap<Uuid, RankEnvelope>,
    last_tasks: &[SensorTaskStamp],
    multiplier: f64,
    now: DateTime<Utc>,
) -> HashMap<Uuid, RankEnvelope> {
    for stamp in last_tasks {
        if let Some(envelope) = envelopes.get_mut(&stamp.sensor_id) {
            let minutes_since = (now - stamp.created_at).num_milliseconds() as f64 / 60_000.0;
            envelope.distribution_rank = multiplier * minutes_since;
        }
    }
    envelopes
}

/// 计算一次评分的全部快照。
///
/// 输出每个有运行时样本的传感器一条记录；只出现在任务时间戳列表中的
/// 传感器被丢弃。输出顺序不作保证。
pub fn calculate_sensor_ranks(
    stats: &[HostRuntimeStat],
    last_tasks: &[SensorTaskStamp],
    weights: &ScoringWeights,
    now: DateTime<Utc>,
) -> Vec<SensorRank> {
    let envelopes = add_runtime_rank(HashMap::new(), stats, &weights.runtime);
    let envelopes =
        add_distribution_rank(envelopes, last_tasks, weights.distribution_multiplier, now);

    envelopes
        .into_iter()
        .map(|(sensor_id, envelope)| SensorRank {
            sensor_id,
            rank: weights.final_rank.runtime * envelope.runtime_rank
                + weights.final_rank.distribution * envelope.distribution_rank,
            distribution_rank: envelope.distribution_rank,
            created_at: now,
        })
        .collect()
}
