// Fixed-interval scheduling. One cycle runs to completion before the
// next tick is considered; a tick that fires mid-cycle is skipped, not
// queued, so slow networks can't pile up concurrent cycles.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::collector::{Collector, CommentSink, CommentSource};

/// Run cycles until ctrl-c. The first cycle starts immediately.
pub async fn run<S: CommentSource, K: CommentSink>(
    collector: &Collector<S, K>,
    period: Duration,
) {
    run_until_shutdown(collector, period, shutdown_signal()).await;
}

/// Run cycles until `shutdown` resolves. Split out from [`run`] so tests
/// can drive the loop with their own shutdown condition.
pub async fn run_until_shutdown<S: CommentSource, K: CommentSink>(
    collector: &Collector<S, K>,
    period: Duration,
    shutdown: impl Future<Output = ()>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // First tick fires immediately; run_cycle is awaited here, so
            // cycles never overlap. A signal arriving mid-cycle is seen
            // once the cycle's writes have finished.
            _ = ticker.tick() => {
                collector.run_cycle().await;
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received, no further cycles will start");
                return;
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // If signal registration fails we can only log and keep running.
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
