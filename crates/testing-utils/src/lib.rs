//! Shared test support for the scheduler workspace
//!
//! In-memory mock implementations of every port plus builders for test
//! entities, so worker logic can be exercised without Postgres or Redis.

pub mod builders;
pub mod mocks;

pub use builders::{RuntimeStatBuilder, SensorRankBuilder, SubscriptionBuilder, TaskBuilder};
pub use mocks::{
    MockRuntimeStatRepository, MockSensorRankRepository, MockSensorRegistry,
    MockSubscriptionRepository, MockTaskPublisher, MockTaskRepository, PublishRecord,
};
