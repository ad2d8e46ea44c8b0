use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use pingmesh_domain::{entities::SensorRank, repositories::SensorRankRepository};
use pingmesh_errors::SchedulerResult;

pub struct PostgresSensorRankRepository {
    pool: PgPool,
}

impl PostgresSensorRankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SensorRankRepository for PostgresSensorRankRepository {
    #[instrument(skip(self, ranks), fields(rank_count = ranks.len()))]
    async fn insert_batch(&self, ranks: &[SensorRank]) -> SchedulerResult<()> {
        if ranks.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO sensor_ranks (sensor_id, rank, distribution_rank, created_at) ",
        );
        builder.push_values(ranks, |mut b, rank| {
            b.push_bind(rank.sensor_id)
                .push_bind(rank.rank)
                .push_bind(rank.distribution_rank)
                .push_bind(rank.created_at);
        });
        builder.build().execute(&self.pool).await?;

        debug!("Inserted {} sensor rank snapshots", ranks.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_ranked_active(&self) -> SchedulerResult<Vec<Uuid>> {
        // 每个传感器取近 60 分钟内 rank > 0 的最新快照，按评分减去
        // 近 10 分钟任务数的结果降序排列，传感器标识升序决胜
        let rows = sqlx::query(
            r#"
            WITH cte_sensors_latest AS (
                SELECT MAX(id) AS id, sensor_id
                FROM sensor_ranks
                WHERE created_at > NOW() - INTERVAL '60 minutes'
                  AND rank > 0
                GROUP BY sensor_id
            )
            SELECT sr.sensor_id
            FROM cte_sensors_latest cte
            INNER JOIN sensor_ranks sr ON (cte.id = sr.id)
            LEFT JOIN (
                SELECT sensor_id, COUNT(*) AS task_count
                FROM tasks
                WHERE created_at > NOW() - INTERVAL '10 minutes'
                GROUP BY sensor_id
            ) AS st ON st.sensor_id = sr.sensor_id
            ORDER BY (sr.rank - COALESCE(st.task_count, 0)) DESC, sr.sensor_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let sensor_ids = rows
            .iter()
            .map(|row| Ok(row.try_get("sensor_id")?))
            .collect::<SchedulerResult<Vec<Uuid>>>()?;

        debug!("Found {} ranked active sensors", sensor_ids.len());
        Ok(sensor_ids)
    }
}
