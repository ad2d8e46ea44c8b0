use pingmesh_common::constants;
use serde::{Deserialize, Serialize};

/// 调度循环配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub enabled: bool,
    /// 调度触发周期（分钟）
    pub scheduler_interval_minutes: u64,
    /// 单次触发内数据库操作预算（秒）
    pub db_timeout_seconds: u64,
    /// 单次发布操作预算（秒）
    pub publish_timeout_seconds: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scheduler_interval_minutes: constants::DEFAULT_SCHEDULER_INTERVAL_MINUTES,
            db_timeout_seconds: constants::DEFAULT_DB_TIMEOUT_SECONDS,
            publish_timeout_seconds: constants::DEFAULT_PUBLISH_TIMEOUT_SECONDS,
        }
    }
}

/// 评分循环配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub enabled: bool,
    /// 评分触发周期（分钟）
    pub rank_interval_minutes: u64,
    /// 运行时样本回溯窗口（分钟），缺省等于评分周期
    pub runtime_window_minutes: Option<u64>,
    /// 轮换评分系数
    pub distribution_multiplier: f64,
    /// 运行时评分权重覆盖
    pub runtime_weights: Option<RuntimeWeightsConfig>,
    /// 最终评分权重覆盖
    pub final_weights: Option<FinalWeightsConfig>,
}

impl RankerConfig {
    /// 实际使用的样本窗口
    pub fn effective_window_minutes(&self) -> u64 {
        self.runtime_window_minutes
            .unwrap_or(self.rank_interval_minutes)
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rank_interval_minutes: constants::DEFAULT_RANK_INTERVAL_MINUTES,
            runtime_window_minutes: None,
            distribution_multiplier: constants::DEFAULT_DISTRIBUTION_MULTIPLIER,
            runtime_weights: None,
            final_weights: None,
        }
    }
}

/// 运行时评分权重：CPU、内存、工作单元负载，三者之和为 1
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuntimeWeightsConfig {
    pub cpu: f64,
    pub memory: f64,
    pub work_units: f64,
}

impl RuntimeWeightsConfig {
    pub fn sum(&self) -> f64 {
        self.cpu + self.memory + self.work_units
    }
}

/// 最终评分权重：运行时评分与轮换评分，两者之和为 1
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinalWeightsConfig {
    pub runtime: f64,
    pub distribution: f64,
}

impl FinalWeightsConfig {
    pub fn sum(&self) -> f64 {
        self.runtime + self.distribution
    }
}
