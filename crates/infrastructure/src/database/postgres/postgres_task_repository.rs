use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use pingmesh_domain::{
    entities::{SensorTaskStamp, Task, TaskStatus},
    repositories::TaskRepository,
};
use pingmesh_errors::{SchedulerError, SchedulerResult};

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[instrument(skip(self, task), fields(
        task_id = %task.id,
        sensor_id = %task.sensor_id,
        subscription_id = %task.subscription_id,
    ))]
    async fn create(&self, task: &Task) -> SchedulerResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, probe_type_id, sensor_id, subscription_id, status_id, opts, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id)
        .bind(task.probe_type)
        .bind(task.sensor_id)
        .bind(task.subscription_id)
        .bind(task.status)
        .bind(&task.opts)
        .bind(task.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Created task {} in state {:?}", task.id, task.status);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: TaskStatus) -> SchedulerResult<()> {
        let result = sqlx::query("UPDATE tasks SET status_id = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(SchedulerError::store_write(format!(
                "task {id} not found for status update"
            )));
        }

        debug!("Task {} moved to state {:?}", id, status);
        Ok(())
    }

    #[instrument(skip(self, sensor_ids), fields(sensor_count = sensor_ids.len()))]
    async fn get_latest_per_sensor(
        &self,
        sensor_ids: &[Uuid],
    ) -> SchedulerResult<Vec<SensorTaskStamp>> {
        if sensor_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT sensor_id, MAX(created_at) AS created_at
            FROM tasks
            WHERE sensor_id = ANY($1)
            GROUP BY sensor_id
            "#,
        )
        .bind(sensor_ids)
        .fetch_all(&self.pool)
        .await?;

        let stamps = rows
            .iter()
            .map(|row| {
                Ok(SensorTaskStamp {
                    sensor_id: row.try_get("sensor_id")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect::<SchedulerResult<Vec<_>>>()?;

        Ok(stamps)
    }
}
