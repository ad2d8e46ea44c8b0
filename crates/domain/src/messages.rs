//! 任务线上消息
//!
//! 每种探测类型对应一种结构化负载，按探测类型标签分发构造。
//! 构造过程是纯函数，不访问任何外部状态。

use pingmesh_errors::SchedulerResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{ProbeType, Task};

/// 发往传感器的探测任务消息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "probe_type")]
pub enum ProbeTaskMessage {
    #[serde(rename = "DNS")]
    Dns(DnsTaskMessage),
    #[serde(rename = "ICMP")]
    Icmp(IcmpTaskMessage),
    #[serde(rename = "HTTP")]
    Http(HttpTaskMessage),
    #[serde(rename = "TRACEROUTE")]
    Traceroute(TracerouteTaskMessage),
}

/// DNS 探测任务负载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsTaskMessage {
    pub task_id: Uuid,
    pub sensor_id: Uuid,
    pub subscription_id: Uuid,
    pub opts: serde_json::Value,
}

/// ICMP 探测任务负载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcmpTaskMessage {
    pub task_id: Uuid,
    pub sensor_id: Uuid,
    pub subscription_id: Uuid,
    pub opts: serde_json::Value,
}

/// HTTP 探测任务负载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpTaskMessage {
    pub task_id: Uuid,
    pub sensor_id: Uuid,
    pub subscription_id: Uuid,
    pub opts: serde_json::Value,
}

/// Traceroute 探测任务负载
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracerouteTaskMessage {
    pub task_id: Uuid,
    pub sensor_id: Uuid,
    pub subscription_id: Uuid,
    pub opts: serde_json::Value,
}

impl ProbeTaskMessage {
    /// 按任务的探测类型构造消息
    pub fn from_task(task: &Task) -> Self {
        match task.probe_type {
            ProbeType::Dns => ProbeTaskMessage::Dns(DnsTaskMessage {
                task_id: task.id,
                sensor_id: task.sensor_id,
                subscription_id: task.subscription_id,
                opts: task.opts.clone(),
            }),
            ProbeType::Icmp => ProbeTaskMessage::Icmp(IcmpTaskMessage {
                task_id: task.id,
                sensor_id: task.sensor_id,
                subscription_id: task.subscription_id,
                opts: task.opts.clone(),
            }),
            ProbeType::Http => ProbeTaskMessage::Http(HttpTaskMessage {
                task_id: task.id,
                sensor_id: task.sensor_id,
                subscription_id: task.subscription_id,
                opts: task.opts.clone(),
            }),
            ProbeType::Traceroute => ProbeTaskMessage::Traceroute(TracerouteTaskMessage {
                task_id: task.id,
                sensor_id: task.sensor_id,
                subscription_id: task.subscription_id,
                opts: task.opts.clone(),
            }),
        }
    }

    /// 序列化消息为字节数组
    pub fn serialize_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// 从字节数组反序列化消息
    pub fn deserialize_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// 构造任务的线上负载。
///
/// 未知的探测类型代码在任务从存储解码时即以
/// [`SchedulerError::UnknownProbeType`](pingmesh_errors::SchedulerError)
/// 失败，不会到达此处。
pub fn build_task_message(task: &Task) -> SchedulerResult<Vec<u8>> {
    Ok(ProbeTaskMessage::from_task(task).serialize_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Subscription, TaskStatus};
    use chrono::Utc;

    fn task_of(probe_type: ProbeType) -> Task {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            probe_type,
            period_seconds: 60,
            tests_requested: 1,
            tests_executed: 0,
            last_execution_completed: None,
            opts: serde_json::json!({"host": "example.com"}),
            is_active: true,
        };
        Task::new(&subscription, Uuid::new_v4(), subscription.opts.clone())
    }

    #[test]
    fn test_build_message_tags_by_probe_type() {
        for (probe_type, tag) in [
            (ProbeType::Dns, "DNS"),
            (ProbeType::Icmp, "ICMP"),
            (ProbeType::Http, "HTTP"),
            (ProbeType::Traceroute, "TRACEROUTE"),
        ] {
            let task = task_of(probe_type);
            let bytes = build_task_message(&task).unwrap();
            let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

            assert_eq!(value["probe_type"], tag);
            assert_eq!(value["task_id"], task.id.to_string());
            assert_eq!(value["sensor_id"], task.sensor_id.to_string());
            assert_eq!(value["opts"]["host"], "example.com");
        }
    }

    #[test]
    fn test_message_round_trip() {
        let task = task_of(ProbeType::Http);
        let bytes = build_task_message(&task).unwrap();
        let message = ProbeTaskMessage::deserialize_bytes(&bytes).unwrap();

        match message {
            ProbeTaskMessage::Http(http) => {
                assert_eq!(http.task_id, task.id);
                assert_eq!(http.subscription_id, task.subscription_id);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_builder_is_pure() {
        let mut task = task_of(ProbeType::Icmp);
        task.created_at = Utc::now();
        task.status = TaskStatus::Initiated;

        let first = build_task_message(&task).unwrap();
        let second = build_task_message(&task).unwrap();
        assert_eq!(first, second);
    }
}
