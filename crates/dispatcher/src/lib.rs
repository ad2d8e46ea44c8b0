//! 调度工作循环
//!
//! 周期性地为每个到期订阅在当前评分最优的传感器中按轮转方式选择
//! 执行者，持久化任务并通过发布频道下发。

pub mod dispatcher;
pub mod opts;

pub use dispatcher::TaskDispatcher;
pub use opts::subscription_task_opts;
