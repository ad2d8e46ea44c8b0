//! 存活传感器枚举
//!
//! 注册表以 `<前缀><sensor_id>` 的键保存每个存活传感器。此处剥离
//! 前缀并校验每个标识；任何一个格式非法都会中止整次评分，避免产出
//! 不完整的快照。

use uuid::Uuid;

use pingmesh_common::constants::REGISTRY_ACTIVE_SENSOR_PREFIX;
use pingmesh_domain::messaging::SensorRegistry;
use pingmesh_errors::{SchedulerError, SchedulerResult};

/// 从注册表读取当前存活的传感器标识
pub async fn live_sensor_ids(registry: &dyn SensorRegistry) -> SchedulerResult<Vec<Uuid>> {
    let keys = registry.active_sensor_keys().await?;

    let mut sensor_ids = Vec::with_capacity(keys.len());
    for key in keys {
        let raw = key
            .strip_prefix(REGISTRY_ACTIVE_SENSOR_PREFIX)
            .unwrap_or(key.as_str());
        let sensor_id = Uuid::parse_str(raw).map_err(|_| SchedulerError::MalformedSensorId {
            value: raw.to_string(),
        })?;
        sensor_ids.push(sensor_id);
    }

    Ok(sensor_ids)
}
