// Scheduler loop behavior: immediate first cycle, repetition, and a
// clean stop when the shutdown future resolves.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use civicpulse_collector::{scheduler, Collector, CommentSink, CommentSource, NewComment};
use graph_client::GraphComment;

/// Source that counts fetches; one fetch per cycle with one post configured.
#[derive(Default)]
struct CountingSource {
    fetches: AtomicUsize,
}

#[async_trait]
impl CommentSource for CountingSource {
    async fn fetch_comments(&self, _post_id: &str) -> anyhow::Result<Vec<GraphComment>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }
}

struct NullSink;

#[async_trait]
impl CommentSink for NullSink {
    async fn upsert_post(&self, _id: &str) -> anyhow::Result<()> {
        Ok(())
    }

    async fn insert_comment(&self, _comment: &NewComment) -> anyhow::Result<bool> {
        Ok(true)
    }
}

#[tokio::test]
async fn first_cycle_runs_immediately() {
    let source = Arc::new(CountingSource::default());
    let collector = Collector::new(source.clone(), NullSink, vec!["P1".to_string()]);

    // Period far longer than the shutdown delay: only the immediate
    // first cycle can have run.
    scheduler::run_until_shutdown(
        &collector,
        Duration::from_secs(3600),
        tokio::time::sleep(Duration::from_millis(50)),
    )
    .await;

    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cycles_repeat_on_the_period() {
    let source = Arc::new(CountingSource::default());
    let collector = Collector::new(source.clone(), NullSink, vec!["P1".to_string()]);

    scheduler::run_until_shutdown(
        &collector,
        Duration::from_millis(20),
        tokio::time::sleep(Duration::from_millis(110)),
    )
    .await;

    // Immediate cycle plus at least two periodic ones; exact count
    // depends on timer scheduling.
    assert!(source.fetches.load(Ordering::SeqCst) >= 3);
}

#[tokio::test]
async fn shutdown_stops_new_cycles() {
    let source = Arc::new(CountingSource::default());
    let collector = Collector::new(source.clone(), NullSink, vec!["P1".to_string()]);

    scheduler::run_until_shutdown(
        &collector,
        Duration::from_millis(10),
        tokio::time::sleep(Duration::from_millis(35)),
    )
    .await;

    let at_shutdown = source.fetches.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(source.fetches.load(Ordering::SeqCst), at_shutdown);
}
