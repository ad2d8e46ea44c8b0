//! # 系统常量定义
//!
//! 包含传感器任务调度系统的所有常量定义

/// 系统名称
pub const SYSTEM_NAME: &str = "pingmesh-scheduler";

/// 系统版本
pub const SYSTEM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 注册表中存活传感器键的前缀，键格式为 `<前缀><sensor_id>`
pub const REGISTRY_ACTIVE_SENSOR_PREFIX: &str = "active_sensor_";

/// 新任务发布频道
pub const NEW_TASK_CHANNEL: &str = "scheduler_new_task";

/// 默认调度间隔（分钟）
pub const DEFAULT_SCHEDULER_INTERVAL_MINUTES: u64 = 1;

/// 默认评分间隔（分钟）
pub const DEFAULT_RANK_INTERVAL_MINUTES: u64 = 10;

/// 默认数据库操作超时（秒）
pub const DEFAULT_DB_TIMEOUT_SECONDS: u64 = 30;

/// 默认发布操作超时（秒）
pub const DEFAULT_PUBLISH_TIMEOUT_SECONDS: u64 = 5;

/// 默认轮换评分系数
pub const DEFAULT_DISTRIBUTION_MULTIPLIER: f64 = 1.0;

/// 评分快照有效窗口（分钟），调度器只读取该窗口内每个传感器的最新快照
pub const RANK_SNAPSHOT_WINDOW_MINUTES: i64 = 60;

/// 近期任务计数窗口（分钟），用于调度排序中的频率修正
pub const RECENT_TASK_WINDOW_MINUTES: i64 = 10;

/// 优雅关闭超时（秒）
pub const SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;
