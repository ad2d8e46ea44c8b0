//! 周期性触发驱动
//!
//! 两个工作循环共享的触发语义：首次触发立即执行，之后按固定周期触发；
//! 一次回调执行完成前不会开始下一次；回调执行超过一个周期时，下一次
//! 紧接着触发，错过的触发不会累积补发。

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// 按固定周期驱动回调，直到收到关闭信号。
///
/// 回调在独立的 tokio 任务中执行，panic 被隔离为该次触发的失败，
/// 不会终止驱动循环。
pub async fn run_ticker<F, Fut>(
    name: &str,
    period: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
    mut pass: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut ticker = interval(period);
    // 错过的触发顺延，不补发
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("{} 周期循环启动，周期: {:?}", name, period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let handle = tokio::spawn(pass());
                if let Err(e) = handle.await {
                    if e.is_panic() {
                        error!("{} 执行发生 panic，等待下一次触发: {}", name, e);
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("{} 周期循环收到关闭信号", name);
                break;
            }
        }
    }
}
