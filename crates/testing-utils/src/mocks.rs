//! Mock implementations for all repository and port traits
//!
//! This module provides in-memory mock implementations that can be used
//! for unit testing without requiring actual database connections or
//! external services.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use pingmesh_domain::entities::{
    HostRuntimeStat, SensorRank, SensorTaskStamp, Subscription, Task, TaskStatus,
};
use pingmesh_domain::messages::ProbeTaskMessage;
use pingmesh_domain::messaging::{SensorRegistry, TaskPublisher};
use pingmesh_domain::repositories::{
    RuntimeStatRepository, SensorRankRepository, SubscriptionRepository, TaskRepository,
};
use pingmesh_errors::{SchedulerError, SchedulerResult};

/// Mock implementation of SubscriptionRepository for testing
#[derive(Debug, Clone, Default)]
pub struct MockSubscriptionRepository {
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockSubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions: Arc::new(Mutex::new(subscriptions)),
            fail_reads: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn get_due(&self, now: DateTime<Utc>) -> SchedulerResult<Vec<Subscription>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(SchedulerError::store_read("injected subscription failure"));
        }
        let subscriptions = self.subscriptions.lock().unwrap();
        Ok(subscriptions
            .iter()
            .filter(|s| s.is_due(now))
            .cloned()
            .collect())
    }
}

/// Mock implementation of TaskRepository for testing
#[derive(Debug, Clone, Default)]
pub struct MockTaskRepository {
    tasks: Arc<Mutex<HashMap<Uuid, Task>>>,
    latest_stamps: Arc<Mutex<Vec<SensorTaskStamp>>>,
    fail_writes: Arc<Mutex<bool>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the latest-task-per-sensor view used by the ranking worker
    pub fn with_latest_stamps(stamps: Vec<SensorTaskStamp>) -> Self {
        Self {
            latest_stamps: Arc::new(Mutex::new(stamps)),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<Task> {
        self.tasks.lock().unwrap().get(&id).cloned()
    }

    pub fn get_all(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().values().cloned().collect()
    }

    /// Current status of a stored task, if present
    pub fn status_of(&self, id: Uuid) -> Option<TaskStatus> {
        self.tasks.lock().unwrap().get(&id).map(|t| t.status)
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn create(&self, task: &Task) -> SchedulerResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(SchedulerError::store_write("injected task write failure"));
        }
        self.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: TaskStatus) -> SchedulerResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(SchedulerError::store_write("injected task write failure"));
        }
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.get_mut(&id) {
            Some(task) => {
                task.status = status;
                Ok(())
            }
            None => Err(SchedulerError::store_write(format!(
                "task {id} not found for status update"
            ))),
        }
    }

    async fn get_latest_per_sensor(
        &self,
        sensor_ids: &[Uuid],
    ) -> SchedulerResult<Vec<SensorTaskStamp>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(SchedulerError::store_read("injected task read failure"));
        }
        let stamps = self.latest_stamps.lock().unwrap();
        Ok(stamps
            .iter()
            .filter(|s| sensor_ids.contains(&s.sensor_id))
            .copied()
            .collect())
    }
}

/// Mock implementation of RuntimeStatRepository for testing
#[derive(Debug, Clone, Default)]
pub struct MockRuntimeStatRepository {
    stats: Arc<Mutex<Vec<HostRuntimeStat>>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockRuntimeStatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(stats: Vec<HostRuntimeStat>) -> Self {
        Self {
            stats: Arc::new(Mutex::new(stats)),
            fail_reads: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }
}

#[async_trait]
impl RuntimeStatRepository for MockRuntimeStatRepository {
    async fn get_recent(
        &self,
        window_minutes: i64,
        sensor_ids: &[Uuid],
    ) -> SchedulerResult<Vec<HostRuntimeStat>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(SchedulerError::store_read("injected stat read failure"));
        }
        let cutoff = Utc::now() - Duration::minutes(window_minutes);
        let stats = self.stats.lock().unwrap();
        Ok(stats
            .iter()
            .filter(|s| s.created_at > cutoff && sensor_ids.contains(&s.sensor_id))
            .cloned()
            .collect())
    }
}

/// Mock implementation of SensorRankRepository for testing
#[derive(Debug, Clone, Default)]
pub struct MockSensorRankRepository {
    batches: Arc<Mutex<Vec<Vec<SensorRank>>>>,
    ranked_active: Arc<Mutex<Vec<Uuid>>>,
    fail_writes: Arc<Mutex<bool>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockSensorRankRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the ranked-active ordering returned to the dispatcher
    pub fn with_ranked_active(sensor_ids: Vec<Uuid>) -> Self {
        Self {
            ranked_active: Arc::new(Mutex::new(sensor_ids)),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn last_batch(&self) -> Option<Vec<SensorRank>> {
        self.batches.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SensorRankRepository for MockSensorRankRepository {
    async fn insert_batch(&self, ranks: &[SensorRank]) -> SchedulerResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(SchedulerError::store_write("injected rank write failure"));
        }
        self.batches.lock().unwrap().push(ranks.to_vec());
        Ok(())
    }

    async fn get_ranked_active(&self) -> SchedulerResult<Vec<Uuid>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(SchedulerError::store_read("injected rank read failure"));
        }
        Ok(self.ranked_active.lock().unwrap().clone())
    }
}

/// Mock implementation of SensorRegistry for testing
#[derive(Debug, Clone, Default)]
pub struct MockSensorRegistry {
    keys: Arc<Mutex<Vec<String>>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockSensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: Vec<String>) -> Self {
        Self {
            keys: Arc::new(Mutex::new(keys)),
            fail_reads: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }
}

#[async_trait]
impl SensorRegistry for MockSensorRegistry {
    async fn active_sensor_keys(&self) -> SchedulerResult<Vec<String>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(SchedulerError::registry_error("injected registry failure"));
        }
        Ok(self.keys.lock().unwrap().clone())
    }
}

/// One observed publish call
#[derive(Debug, Clone)]
pub struct PublishRecord {
    pub channel: String,
    pub payload: Vec<u8>,
    pub task_id: Option<Uuid>,
    /// Status the published task had in the task repository at the moment of
    /// the publish call, when the mock was wired to one
    pub task_status_at_publish: Option<TaskStatus>,
}

/// Mock implementation of TaskPublisher for testing
///
/// Records every publish call; optionally observes the task repository so
/// ordering between persistence and publication can be asserted.
#[derive(Debug, Clone, Default)]
pub struct MockTaskPublisher {
    records: Arc<Mutex<Vec<PublishRecord>>>,
    receiver_count: Arc<Mutex<i64>>,
    fail_publish: Arc<Mutex<bool>>,
    task_repository: Arc<Mutex<Option<MockTaskRepository>>>,
}

impl MockTaskPublisher {
    pub fn new() -> Self {
        Self {
            receiver_count: Arc::new(Mutex::new(1)),
            ..Self::default()
        }
    }

    /// Receiver count returned from every publish
    pub fn with_receiver_count(self, count: i64) -> Self {
        *self.receiver_count.lock().unwrap() = count;
        self
    }

    /// Observe task statuses in the given repository at publish time
    pub fn with_task_repository(self, repository: MockTaskRepository) -> Self {
        *self.task_repository.lock().unwrap() = Some(repository);
        self
    }

    pub fn set_receiver_count(&self, count: i64) {
        *self.receiver_count.lock().unwrap() = count;
    }

    pub fn set_fail_publish(&self, fail: bool) {
        *self.fail_publish.lock().unwrap() = fail;
    }

    pub fn publish_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn records(&self) -> Vec<PublishRecord> {
        self.records.lock().unwrap().clone()
    }
}

fn task_id_of_payload(payload: &[u8]) -> Option<Uuid> {
    match ProbeTaskMessage::deserialize_bytes(payload).ok()? {
        ProbeTaskMessage::Dns(m) => Some(m.task_id),
        ProbeTaskMessage::Icmp(m) => Some(m.task_id),
        ProbeTaskMessage::Http(m) => Some(m.task_id),
        ProbeTaskMessage::Traceroute(m) => Some(m.task_id),
    }
}

#[async_trait]
impl TaskPublisher for MockTaskPublisher {
    async fn publish(&self, channel: &str, payload: &[u8]) -> SchedulerResult<i64> {
        if *self.fail_publish.lock().unwrap() {
            return Err(SchedulerError::publish_error("injected publish failure"));
        }

        let task_id = task_id_of_payload(payload);
        let task_status_at_publish = match (&task_id, self.task_repository.lock().unwrap().as_ref())
        {
            (Some(id), Some(repository)) => repository.status_of(*id),
            _ => None,
        };

        self.records.lock().unwrap().push(PublishRecord {
            channel: channel.to_string(),
            payload: payload.to_vec(),
            task_id,
            task_status_at_publish,
        });

        Ok(*self.receiver_count.lock().unwrap())
    }
}
