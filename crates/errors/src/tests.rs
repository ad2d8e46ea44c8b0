use crate::*;
use uuid::Uuid;

#[test]
fn test_scheduler_error_display() {
    let read_error = SchedulerError::StoreRead("connection reset".to_string());
    assert_eq!(read_error.to_string(), "数据库读取错误: connection reset");

    let write_error = SchedulerError::StoreWrite("insert failed".to_string());
    assert_eq!(write_error.to_string(), "数据库写入错误: insert failed");

    let registry_error = SchedulerError::Registry("KEYS failed".to_string());
    assert_eq!(registry_error.to_string(), "注册表错误: KEYS failed");

    let malformed = SchedulerError::MalformedSensorId {
        value: "not-a-uuid".to_string(),
    };
    assert_eq!(malformed.to_string(), "无效的传感器标识: not-a-uuid");

    let probe_error = SchedulerError::UnknownProbeType { code: 9 };
    assert_eq!(probe_error.to_string(), "未知的探测类型代码: 9");

    let config_error = SchedulerError::Configuration("missing database url".to_string());
    assert_eq!(config_error.to_string(), "配置错误: missing database url");

    let timeout_error = SchedulerError::Timeout("publish took too long".to_string());
    assert_eq!(timeout_error.to_string(), "操作超时: publish took too long");
}

#[test]
fn test_no_subscribers_display() {
    let task_id = Uuid::parse_str("3f8f0e4d-6723-4d52-a1b8-8a203af94765").unwrap();
    let sensor_id = Uuid::parse_str("352e751c-5c7d-411a-9c9c-9a9a036fccb3").unwrap();
    let err = SchedulerError::NoSubscribers { task_id, sensor_id };
    assert_eq!(
        err.to_string(),
        format!("没有订阅者接收任务: task_id={task_id}, sensor_id={sensor_id}")
    );
}

#[test]
fn test_error_classification() {
    assert!(SchedulerError::Configuration("bad".to_string()).is_fatal());
    assert!(SchedulerError::Internal("bug".to_string()).is_fatal());
    assert!(!SchedulerError::StoreRead("transient".to_string()).is_fatal());

    assert!(SchedulerError::StoreRead("transient".to_string()).is_retryable());
    assert!(SchedulerError::Registry("transient".to_string()).is_retryable());
    assert!(SchedulerError::Timeout("slow".to_string()).is_retryable());
    assert!(!SchedulerError::UnknownProbeType { code: 9 }.is_retryable());
    assert!(!SchedulerError::Configuration("bad".to_string()).is_retryable());
}

#[test]
fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
    let err: SchedulerError = json_err.into();
    assert!(matches!(err, SchedulerError::Serialization(_)));
}

#[test]
fn test_helper_constructors() {
    assert!(matches!(
        SchedulerError::store_read("x"),
        SchedulerError::StoreRead(_)
    ));
    assert!(matches!(
        SchedulerError::publish_error("x"),
        SchedulerError::Publish(_)
    ));
    assert!(matches!(
        SchedulerError::timeout_error("x"),
        SchedulerError::Timeout(_)
    ));
}
