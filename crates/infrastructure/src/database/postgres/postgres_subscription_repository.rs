use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

use pingmesh_domain::{entities::Subscription, repositories::SubscriptionRepository};
use pingmesh_errors::SchedulerResult;

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_subscription(row: &sqlx::postgres::PgRow) -> SchedulerResult<Subscription> {
        Ok(Subscription {
            id: row.try_get("id")?,
            probe_type: row.try_get("probe_type_id")?,
            period_seconds: row.try_get("period_seconds")?,
            tests_requested: row.try_get("tests_requested")?,
            tests_executed: row.try_get("tests_executed")?,
            last_execution_completed: row.try_get("last_execution_completed")?,
            opts: row.try_get("opts")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    #[instrument(skip(self))]
    async fn get_due(&self, now: DateTime<Utc>) -> SchedulerResult<Vec<Subscription>> {
        let rows = sqlx::query(
            r#"
            SELECT id, probe_type_id, period_seconds, tests_requested, tests_executed,
                   last_execution_completed, opts, is_active
            FROM subscriptions
            WHERE tests_requested > tests_executed
              AND ((last_execution_completed + period_seconds * interval '1 second') < $1
                   OR last_execution_completed IS NULL)
              AND is_active = true
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        let subscriptions = rows
            .iter()
            .map(Self::row_to_subscription)
            .collect::<SchedulerResult<Vec<_>>>()?;

        debug!("Found {} due subscriptions", subscriptions.len());
        Ok(subscriptions)
    }
}
