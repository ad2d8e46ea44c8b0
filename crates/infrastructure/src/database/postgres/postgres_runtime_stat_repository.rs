use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use pingmesh_domain::{entities::HostRuntimeStat, repositories::RuntimeStatRepository};
use pingmesh_errors::SchedulerResult;

pub struct PostgresRuntimeStatRepository {
    pool: PgPool,
}

impl PostgresRuntimeStatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_stat(row: &sqlx::postgres::PgRow) -> SchedulerResult<HostRuntimeStat> {
        Ok(HostRuntimeStat {
            sensor_id: row.try_get("sensor_id")?,
            cpu_usage_percent: row.try_get("cpu_usage_percent")?,
            mem_used_percent: row.try_get("mem_used_percent")?,
            work_unit_count: row.try_get("work_unit_count")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl RuntimeStatRepository for PostgresRuntimeStatRepository {
    #[instrument(skip(self, sensor_ids), fields(sensor_count = sensor_ids.len()))]
    async fn get_recent(
        &self,
        window_minutes: i64,
        sensor_ids: &[Uuid],
    ) -> SchedulerResult<Vec<HostRuntimeStat>> {
        if sensor_ids.is_empty() {
            return Ok(Vec::new());
        }

        // 升序返回，评分阶段按后写覆盖的语义折叠同一传感器的多个样本
        let rows = sqlx::query(
            r#"
            SELECT sensor_id, cpu_usage_percent, mem_used_percent, work_unit_count, created_at
            FROM sensor_host_runtime_stats
            WHERE created_at > NOW() - ($1 * interval '1 minute')
              AND sensor_id = ANY($2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(window_minutes)
        .bind(sensor_ids)
        .fetch_all(&self.pool)
        .await?;

        let stats = rows
            .iter()
            .map(Self::row_to_stat)
            .collect::<SchedulerResult<Vec<_>>>()?;

        debug!(
            "Fetched {} runtime stat samples in a {} minute window",
            stats.len(),
            window_minutes
        );
        Ok(stats)
    }
}
