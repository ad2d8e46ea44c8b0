//! Test data builders for creating test entities
//!
//! This module provides builder patterns for creating test data with
//! sensible defaults and easy customization.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pingmesh_domain::entities::{
    HostRuntimeStat, ProbeType, SensorRank, Subscription, Task, TaskStatus,
};

/// Builder for creating test Subscription entities
pub struct SubscriptionBuilder {
    subscription: Subscription,
}

impl SubscriptionBuilder {
    pub fn new() -> Self {
        Self {
            subscription: Subscription {
                id: Uuid::new_v4(),
                probe_type: ProbeType::Icmp,
                period_seconds: 60,
                tests_requested: 10,
                tests_executed: 0,
                last_execution_completed: None,
                opts: serde_json::json!({}),
                is_active: true,
            },
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.subscription.id = id;
        self
    }

    pub fn with_probe_type(mut self, probe_type: ProbeType) -> Self {
        self.subscription.probe_type = probe_type;
        self
    }

    pub fn with_period_seconds(mut self, period_seconds: i64) -> Self {
        self.subscription.period_seconds = period_seconds;
        self
    }

    pub fn with_counts(mut self, requested: i64, executed: i64) -> Self {
        self.subscription.tests_requested = requested;
        self.subscription.tests_executed = executed;
        self
    }

    pub fn with_last_execution(mut self, completed_at: DateTime<Utc>) -> Self {
        self.subscription.last_execution_completed = Some(completed_at);
        self
    }

    pub fn with_opts(mut self, opts: serde_json::Value) -> Self {
        self.subscription.opts = opts;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.subscription.is_active = false;
        self
    }

    pub fn build(self) -> Subscription {
        self.subscription
    }
}

impl Default for SubscriptionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test Task entities
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            task: Task {
                id: Uuid::new_v4(),
                probe_type: ProbeType::Icmp,
                sensor_id: Uuid::new_v4(),
                subscription_id: Uuid::new_v4(),
                status: TaskStatus::Initiated,
                opts: serde_json::json!({}),
                created_at: Utc::now(),
            },
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.task.id = id;
        self
    }

    pub fn with_probe_type(mut self, probe_type: ProbeType) -> Self {
        self.task.probe_type = probe_type;
        self
    }

    pub fn with_sensor_id(mut self, sensor_id: Uuid) -> Self {
        self.task.sensor_id = sensor_id;
        self
    }

    pub fn with_subscription_id(mut self, subscription_id: Uuid) -> Self {
        self.task.subscription_id = subscription_id;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.task.created_at = created_at;
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating test HostRuntimeStat entities
pub struct RuntimeStatBuilder {
    stat: HostRuntimeStat,
}

impl RuntimeStatBuilder {
    pub fn new(sensor_id: Uuid) -> Self {
        Self {
            stat: HostRuntimeStat {
                sensor_id,
                cpu_usage_percent: 10.0,
                mem_used_percent: 10.0,
                work_unit_count: 2,
                created_at: Utc::now(),
            },
        }
    }

    pub fn with_cpu(mut self, cpu_usage_percent: f64) -> Self {
        self.stat.cpu_usage_percent = cpu_usage_percent;
        self
    }

    pub fn with_memory(mut self, mem_used_percent: f64) -> Self {
        self.stat.mem_used_percent = mem_used_percent;
        self
    }

    pub fn with_work_units(mut self, work_unit_count: i64) -> Self {
        self.stat.work_unit_count = work_unit_count;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.stat.created_at = created_at;
        self
    }

    pub fn build(self) -> HostRuntimeStat {
        self.stat
    }
}

/// Builder for creating test SensorRank entities
pub struct SensorRankBuilder {
    rank: SensorRank,
}

impl SensorRankBuilder {
    pub fn new(sensor_id: Uuid) -> Self {
        Self {
            rank: SensorRank {
                sensor_id,
                rank: 90.0,
                distribution_rank: 0.0,
                created_at: Utc::now(),
            },
        }
    }

    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank.rank = rank;
        self
    }

    pub fn with_distribution_rank(mut self, distribution_rank: f64) -> Self {
        self.rank.distribution_rank = distribution_rank;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.rank.created_at = created_at;
        self
    }

    pub fn build(self) -> SensorRank {
        self.rank
    }
}
