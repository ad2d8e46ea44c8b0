use anyhow::{bail, Result};

use crate::models::AppConfig;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// 校验配置取值的合法性
pub fn validate(config: &AppConfig) -> Result<()> {
    if config.database.url.is_empty() {
        bail!("database.url 不能为空");
    }
    if config.database.max_connections == 0 {
        bail!("database.max_connections 必须大于 0");
    }
    if config.database.min_connections > config.database.max_connections {
        bail!("database.min_connections 不能大于 max_connections");
    }
    if config.registry.host.is_empty() {
        bail!("registry.host 不能为空");
    }

    if config.dispatcher.scheduler_interval_minutes == 0 {
        bail!("dispatcher.scheduler_interval_minutes 必须大于 0");
    }
    if config.dispatcher.db_timeout_seconds == 0 {
        bail!("dispatcher.db_timeout_seconds 必须大于 0");
    }
    if config.dispatcher.publish_timeout_seconds == 0 {
        bail!("dispatcher.publish_timeout_seconds 必须大于 0");
    }

    if config.ranker.rank_interval_minutes == 0 {
        bail!("ranker.rank_interval_minutes 必须大于 0");
    }
    if config.ranker.runtime_window_minutes == Some(0) {
        bail!("ranker.runtime_window_minutes 必须大于 0");
    }
    if config.ranker.distribution_multiplier < 0.0 {
        bail!("ranker.distribution_multiplier 不能为负数");
    }

    if let Some(weights) = &config.ranker.runtime_weights {
        if weights.cpu < 0.0 || weights.memory < 0.0 || weights.work_units < 0.0 {
            bail!("ranker.runtime_weights 各项不能为负数");
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            bail!("ranker.runtime_weights 各项之和必须为 1");
        }
    }
    if let Some(weights) = &config.ranker.final_weights {
        if weights.runtime < 0.0 || weights.distribution < 0.0 {
            bail!("ranker.final_weights 各项不能为负数");
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            bail!("ranker.final_weights 各项之和必须为 1");
        }
    }

    Ok(())
}
