//! Timeout handling utilities for async operations
//!
//! Wraps the per-pass I/O budgets (database and publish) around arbitrary
//! async operations, converting elapsed budgets into scheduler errors.

use pingmesh_errors::{SchedulerError, SchedulerResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::error;

pub struct TimeoutUtils;

impl TimeoutUtils {
    /// Execute an operation under an explicit time budget
    pub async fn custom<F, T>(
        operation: F,
        timeout_duration: Duration,
        operation_name: &str,
    ) -> SchedulerResult<T>
    where
        F: Future<Output = SchedulerResult<T>>,
    {
        match timeout(timeout_duration, operation).await {
            Ok(result) => result,
            Err(_) => {
                let error_msg =
                    format!("操作 '{operation_name}' 超时 (超时时间: {timeout_duration:?})");
                error!("{}", error_msg);
                Err(SchedulerError::timeout_error(error_msg))
            }
        }
    }
}
