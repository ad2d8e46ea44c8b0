//! Domain Entities
//!
//! 核心领域实体定义，包含订阅、探测任务、运行时状态样本和传感器评分等
//! 业务核心概念。这些实体是系统的核心业务模型，不依赖于外部技术实现。

use chrono::{DateTime, Duration, Utc};
use pingmesh_errors::SchedulerError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// 探测类型
// ============================================================================

/// 探测类型
///
/// 传感器支持的四种测量探测族，持久化为整型代码。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProbeType {
    #[serde(rename = "DNS")]
    Dns,
    #[serde(rename = "ICMP")]
    Icmp,
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "TRACEROUTE")]
    Traceroute,
}

impl ProbeType {
    /// 持久化使用的整型代码
    pub fn code(&self) -> i16 {
        match self {
            ProbeType::Dns => 1,
            ProbeType::Icmp => 2,
            ProbeType::Http => 3,
            ProbeType::Traceroute => 4,
        }
    }
}

impl TryFrom<i16> for ProbeType {
    type Error = SchedulerError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ProbeType::Dns),
            2 => Ok(ProbeType::Icmp),
            3 => Ok(ProbeType::Http),
            4 => Ok(ProbeType::Traceroute),
            _ => Err(SchedulerError::UnknownProbeType { code }),
        }
    }
}

// SQLx 数据库类型支持 - ProbeType
impl sqlx::Type<sqlx::Postgres> for ProbeType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("INT2")
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ProbeType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let code = <i16 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        ProbeType::try_from(code).map_err(|e| e.to_string().into())
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for ProbeType {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <i16 as sqlx::Encode<sqlx::Postgres>>::encode(self.code(), buf)
    }
}

// ============================================================================
// 订阅相关实体
// ============================================================================

/// 客户订阅
///
/// 表示客户对某种探测类型的长期周期性测量请求。
///
/// # 字段说明
///
/// - `id`: 订阅的唯一标识符
/// - `probe_type`: 探测类型
/// - `period_seconds`: 配置的执行周期（秒）
/// - `tests_requested`: 请求的执行总次数
/// - `tests_executed`: 已完成的执行次数
/// - `last_execution_completed`: 最近一次完成执行的时间（可能为空）
/// - `opts`: 探测配置，对调度核心不透明
/// - `is_active`: 订阅是否处于活跃状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub probe_type: ProbeType,
    pub period_seconds: i64,
    pub tests_requested: i64,
    pub tests_executed: i64,
    pub last_execution_completed: Option<DateTime<Utc>>,
    pub opts: serde_json::Value,
    pub is_active: bool,
}

impl Subscription {
    /// 订阅是否到期需要新的执行。
    ///
    /// `tests_executed` 与 `last_execution_completed` 由下游系统在执行
    /// 完成后更新；若这些更新不落地，同一订阅会在每次触发时重复到期。
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.tests_executed < self.tests_requested
            && match self.last_execution_completed {
                Some(last) => last + Duration::seconds(self.period_seconds) < now,
                None => true,
            }
    }
}

// ============================================================================
// 任务相关实体
// ============================================================================

/// 任务生命周期状态
///
/// 调度核心只驱动 `Initiated -> Published` 两个状态；后续状态由
/// 下游系统推进。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[serde(rename = "INITIATED")]
    Initiated,
    #[serde(rename = "PUBLISHED")]
    Published,
}

impl TaskStatus {
    pub fn code(&self) -> i16 {
        match self {
            TaskStatus::Initiated => 1,
            TaskStatus::Published => 2,
        }
    }
}

// SQLx 数据库类型支持 - TaskStatus
impl sqlx::Type<sqlx::Postgres> for TaskStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("INT2")
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TaskStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let code = <i16 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        match code {
            1 => Ok(TaskStatus::Initiated),
            2 => Ok(TaskStatus::Published),
            _ => Err(format!("Invalid task status code: {code}").into()),
        }
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for TaskStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        <i16 as sqlx::Encode<sqlx::Postgres>>::encode(self.code(), buf)
    }
}

/// 探测任务
///
/// 一次已调度的探测执行。由调度循环创建，此后归下游系统所有。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub probe_type: ProbeType,
    pub sensor_id: Uuid,
    pub subscription_id: Uuid,
    pub status: TaskStatus,
    pub opts: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// 为 (订阅, 传感器) 组合创建新任务，初始状态为 Initiated
    pub fn new(subscription: &Subscription, sensor_id: Uuid, opts: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            probe_type: subscription.probe_type,
            sensor_id,
            subscription_id: subscription.id,
            status: TaskStatus::Initiated,
            opts,
            created_at: Utc::now(),
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self.status, TaskStatus::Published)
    }
}

/// 传感器最近一次任务的时间戳
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorTaskStamp {
    pub sensor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// 评分相关实体
// ============================================================================

/// 传感器运行时状态样本
///
/// 由传感器写入，评分循环按时间窗口读取。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostRuntimeStat {
    pub sensor_id: Uuid,
    /// CPU 使用率，0-100
    pub cpu_usage_percent: f64,
    /// 内存使用率，0-100
    pub mem_used_percent: f64,
    /// 并发工作单元数量
    pub work_unit_count: i64,
    pub created_at: DateTime<Utc>,
}

/// 传感器评分快照
///
/// 每次评分产出的持久化记录，只追加；同一传感器的新记录覆盖旧记录的
/// 语义由读取方（最新一条）实现。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorRank {
    pub sensor_id: Uuid,
    pub rank: f64,
    pub distribution_rank: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(
        tests_requested: i64,
        tests_executed: i64,
        last: Option<DateTime<Utc>>,
        is_active: bool,
    ) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            probe_type: ProbeType::Icmp,
            period_seconds: 600,
            tests_requested,
            tests_executed,
            last_execution_completed: last,
            opts: serde_json::json!({}),
            is_active,
        }
    }

    #[test]
    fn test_subscription_due_when_never_executed() {
        let now = Utc::now();
        let sub = subscription(10, 0, None, true);
        assert!(sub.is_due(now));
    }

    #[test]
    fn test_subscription_due_after_period_elapsed() {
        let now = Utc::now();
        let sub = subscription(10, 3, Some(now - Duration::seconds(601)), true);
        assert!(sub.is_due(now));
    }

    #[test]
    fn test_subscription_not_due_within_period() {
        let now = Utc::now();
        let sub = subscription(10, 3, Some(now - Duration::seconds(300)), true);
        assert!(!sub.is_due(now));
    }

    #[test]
    fn test_subscription_not_due_when_exhausted() {
        let now = Utc::now();
        let sub = subscription(10, 10, None, true);
        assert!(!sub.is_due(now));
    }

    #[test]
    fn test_subscription_not_due_when_inactive() {
        let now = Utc::now();
        let sub = subscription(10, 0, None, false);
        assert!(!sub.is_due(now));
    }

    #[test]
    fn test_probe_type_codes_round_trip() {
        for probe_type in [
            ProbeType::Dns,
            ProbeType::Icmp,
            ProbeType::Http,
            ProbeType::Traceroute,
        ] {
            assert_eq!(ProbeType::try_from(probe_type.code()).unwrap(), probe_type);
        }
    }

    #[test]
    fn test_probe_type_unknown_code() {
        let err = ProbeType::try_from(9).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::UnknownProbeType { code: 9 }
        ));
    }

    #[test]
    fn test_new_task_starts_initiated() {
        let sub = subscription(10, 0, None, true);
        let sensor_id = Uuid::new_v4();
        let task = Task::new(&sub, sensor_id, sub.opts.clone());

        assert_eq!(task.status, TaskStatus::Initiated);
        assert_eq!(task.probe_type, sub.probe_type);
        assert_eq!(task.sensor_id, sensor_id);
        assert_eq!(task.subscription_id, sub.id);
        assert!(!task.is_published());
    }
}
