use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use pingmesh_domain::entities::{SensorRank, SensorTaskStamp};
use pingmesh_ranker::score::{calculate_sensor_ranks, FinalRankWeights, ScoringWeights};
use pingmesh_testing_utils::RuntimeStatBuilder;

fn sensor(n: usize) -> Uuid {
    let ids = [
        "3f8f0e4d-6723-4d52-a1b8-8a203af94765",
        "352e751c-5c7d-411a-9c9c-9a9a036fccb3",
        "afb51543-b7c7-4324-9fe9-46a20295a50a",
    ];
    Uuid::parse_str(ids[n - 1]).unwrap()
}

fn by_sensor(ranks: Vec<SensorRank>) -> HashMap<Uuid, SensorRank> {
    ranks.into_iter().map(|r| (r.sensor_id, r)).collect()
}

fn assert_rank_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "rank mismatch: actual={actual}, expected={expected}"
    );
}

#[test]
fn test_three_healthy_sensors() {
    let now = Utc::now();
    let stats = vec![
        RuntimeStatBuilder::new(sensor(1))
            .with_cpu(10.0)
            .with_memory(10.0)
            .with_work_units(2)
            .build(),
        RuntimeStatBuilder::new(sensor(2))
            .with_cpu(20.0)
            .with_memory(20.0)
            .with_work_units(2)
            .build(),
        RuntimeStatBuilder::new(sensor(3))
            .with_cpu(50.0)
            .with_memory(50.0)
            .with_work_units(16)
            .build(),
    ];
    let last_tasks = vec![
        SensorTaskStamp {
            sensor_id: sensor(1),
            created_at: now - Duration::minutes(10),
        },
        SensorTaskStamp {
            sensor_id: sensor(2),
            created_at: now - Duration::minutes(20),
        },
        SensorTaskStamp {
            sensor_id: sensor(3),
            created_at: now - Duration::minutes(30),
        },
    ];

    let ranks = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));

    assert_eq!(ranks.len(), 3);
    assert_rank_close(ranks[&sensor(1)].rank, 91.39393939393939);
    assert_rank_close(ranks[&sensor(2)].rank, 83.39393939393939);
    assert_rank_close(ranks[&sensor(3)].rank, 55.15151515151515);
    // 轮换评分按整数分钟断言，容忍测试执行期间的时间漂移
    assert_eq!(ranks[&sensor(1)].distribution_rank.round(), 10.0);
    assert_eq!(ranks[&sensor(2)].distribution_rank.round(), 20.0);
    assert_eq!(ranks[&sensor(3)].distribution_rank.round(), 30.0);
}

#[test]
fn test_full_capacity_sensor_is_clamped_to_zero() {
    let now = Utc::now();
    let stats = vec![RuntimeStatBuilder::new(sensor(1))
        .with_cpu(100.0)
        .with_memory(10.0)
        .with_work_units(2)
        .build()];
    let last_tasks = vec![SensorTaskStamp {
        sensor_id: sensor(1),
        created_at: now - Duration::minutes(10),
    }];

    let ranks = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));

    assert_eq!(ranks.len(), 1);
    assert_eq!(ranks[&sensor(1)].rank, 0.0);
    assert_eq!(ranks[&sensor(1)].distribution_rank.round(), 10.0);
}

#[test]
fn test_full_memory_is_also_clamped() {
    let now = Utc::now();
    let stats = vec![RuntimeStatBuilder::new(sensor(1))
        .with_cpu(10.0)
        .with_memory(100.0)
        .build()];

    let ranks = by_sensor(calculate_sensor_ranks(
        &stats,
        &[],
        &ScoringWeights::default(),
        now,
    ));
    assert_eq!(ranks[&sensor(1)].rank, 0.0);
}

#[test]
fn test_mismatched_inputs_drop_taskless_sensor() {
    let now = Utc::now();
    let stats = vec![RuntimeStatBuilder::new(sensor(1))
        .with_cpu(10.0)
        .with_memory(10.0)
        .with_work_units(2)
        .build()];
    // 只有任务时间戳、没有运行时样本的传感器不可评分
    let last_tasks = vec![SensorTaskStamp {
        sensor_id: sensor(2),
        created_at: now - Duration::minutes(10),
    }];

    let ranks = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));

    assert_eq!(ranks.len(), 1);
    assert_rank_close(ranks[&sensor(1)].rank, 91.39393939393939);
    assert_eq!(ranks[&sensor(1)].distribution_rank, 0.0);
}

#[test]
fn test_empty_stats_give_empty_result() {
    let now = Utc::now();
    let last_tasks = vec![SensorTaskStamp {
        sensor_id: sensor(2),
        created_at: now - Duration::minutes(10),
    }];

    let ranks = calculate_sensor_ranks(&[], &last_tasks, &ScoringWeights::default(), now);
    assert!(ranks.is_empty());
}

#[test]
fn test_input_order_does_not_change_output() {
    let now = Utc::now();
    let mut stats = vec![
        RuntimeStatBuilder::new(sensor(1))
            .with_cpu(10.0)
            .with_memory(10.0)
            .build(),
        RuntimeStatBuilder::new(sensor(2))
            .with_cpu(20.0)
            .with_memory(20.0)
            .build(),
        RuntimeStatBuilder::new(sensor(3))
            .with_cpu(50.0)
            .with_memory(50.0)
            .build(),
    ];
    let mut last_tasks = vec![
        SensorTaskStamp {
            sensor_id: sensor(1),
            created_at: now - Duration::minutes(10),
        },
        SensorTaskStamp {
            sensor_id: sensor(3),
            created_at: now - Duration::minutes(30),
        },
    ];

    let forward = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));
    stats.reverse();
    last_tasks.reverse();
    let reversed = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));

    assert_eq!(forward.len(), reversed.len());
    for (sensor_id, rank) in &forward {
        assert_eq!(rank.rank, reversed[sensor_id].rank);
        assert_eq!(rank.distribution_rank, reversed[sensor_id].distribution_rank);
    }
}

#[test]
fn test_last_sample_wins_within_window() {
    let now = Utc::now();
    // 同一传感器的两个样本：后列出的样本决定评分
    let stats = vec![
        RuntimeStatBuilder::new(sensor(1))
            .with_cpu(90.0)
            .with_memory(90.0)
            .with_work_units(2)
            .build(),
        RuntimeStatBuilder::new(sensor(1))
            .with_cpu(10.0)
            .with_memory(10.0)
            .with_work_units(2)
            .build(),
    ];

    let ranks = by_sensor(calculate_sensor_ranks(
        &stats,
        &[],
        &ScoringWeights::default(),
        now,
    ));

    assert_eq!(ranks.len(), 1);
    assert_rank_close(ranks[&sensor(1)].rank, 91.39393939393939);
}

#[test]
fn test_older_last_task_gets_strictly_greater_distribution() {
    let now = Utc::now();
    let stats = vec![
        RuntimeStatBuilder::new(sensor(1)).build(),
        RuntimeStatBuilder::new(sensor(2)).build(),
    ];
    let last_tasks = vec![
        SensorTaskStamp {
            sensor_id: sensor(1),
            created_at: now - Duration::minutes(5),
        },
        SensorTaskStamp {
            sensor_id: sensor(2),
            created_at: now - Duration::minutes(25),
        },
    ];

    let ranks = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));

    assert!(ranks[&sensor(2)].distribution_rank > ranks[&sensor(1)].distribution_rank);
}

#[test]
fn test_distribution_multiplier_scales_linearly() {
    let now = Utc::now();
    let stats = vec![RuntimeStatBuilder::new(sensor(1)).build()];
    let last_tasks = vec![SensorTaskStamp {
        sensor_id: sensor(1),
        created_at: now - Duration::minutes(10),
    }];

    let mut weights = ScoringWeights::default();
    weights.distribution_multiplier = 3.0;

    let ranks = by_sensor(calculate_sensor_ranks(&stats, &last_tasks, &weights, now));
    assert_eq!(ranks[&sensor(1)].distribution_rank.round(), 30.0);
}

#[test]
fn test_final_weight_override_mixes_distribution_in() {
    let now = Utc::now();
    let stats = vec![RuntimeStatBuilder::new(sensor(1))
        .with_cpu(10.0)
        .with_memory(10.0)
        .with_work_units(2)
        .build()];
    let last_tasks = vec![SensorTaskStamp {
        sensor_id: sensor(1),
        created_at: now - Duration::minutes(10),
    }];

    let mut weights = ScoringWeights::default();
    weights.final_rank = FinalRankWeights {
        runtime: 0.8,
        distribution: 0.2,
    };

    let ranks = by_sensor(calculate_sensor_ranks(&stats, &last_tasks, &weights, now));
    // 0.8 * 91.3939... + 0.2 * 10
    assert_rank_close(ranks[&sensor(1)].rank, 0.8 * 91.39393939393939 + 2.0);
}

#[test]
fn test_identical_inputs_give_identical_outputs() {
    let now = Utc::now();
    let stats = vec![RuntimeStatBuilder::new(sensor(1)).build()];
    let last_tasks = vec![SensorTaskStamp {
        sensor_id: sensor(1),
        created_at: now - Duration::minutes(10),
    }];

    let first = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));
    let second = by_sensor(calculate_sensor_ranks(
        &stats,
        &last_tasks,
        &ScoringWeights::default(),
        now,
    ));

    assert_eq!(first[&sensor(1)].rank, second[&sensor(1)].rank);
    assert_eq!(
        first[&sensor(1)].distribution_rank,
        second[&sensor(1)].distribution_rank
    );
}
