use pingmesh_domain::entities::Subscription;
use pingmesh_errors::SchedulerResult;

/// 订阅配置与任务配置之间的转换层
///
/// 目前原样透传，保留为将来按探测类型改写配置的扩展点。
pub fn subscription_task_opts(subscription: &Subscription) -> SchedulerResult<serde_json::Value> {
    Ok(subscription.opts.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pingmesh_domain::entities::ProbeType;
    use uuid::Uuid;

    #[test]
    fn test_opts_pass_through() {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            probe_type: ProbeType::Dns,
            period_seconds: 60,
            tests_requested: 1,
            tests_executed: 0,
            last_execution_completed: None,
            opts: serde_json::json!({"fqdn": "example.com", "record": "A"}),
            is_active: true,
        };

        let opts = subscription_task_opts(&subscription).unwrap();
        assert_eq!(opts, subscription.opts);
    }
}
