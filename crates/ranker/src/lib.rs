//! 评分工作循环
//!
//! 周期性地观察存活传感器，基于运行时健康状况与任务轮换新鲜度计算
//! 综合评分，并批量持久化评分快照供调度循环读取。

pub mod liveness;
pub mod score;
pub mod worker;

pub use liveness::live_sensor_ids;
pub use score::{
    calculate_sensor_ranks, FinalRankWeights, HostRuntimeWeights, RankEnvelope, ScoringWeights,
};
pub use worker::RankWorker;
