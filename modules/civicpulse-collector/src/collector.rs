// One ingestion cycle: for each configured post, ensure the post row
// exists, fetch its visible comments, normalize and anonymize them, and
// persist. Failures are contained per post (and per record for writes);
// a bad post never stops the ones after it.

use async_trait::async_trait;
use tracing::{info, warn};

use graph_client::{GraphClient, GraphComment};

use crate::anonymize::commenter_hash;
use crate::store::{CommentStore, NewComment};

/// Where raw comments come from. Behind a trait so cycle logic is
/// testable without the network.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self, post_id: &str) -> anyhow::Result<Vec<GraphComment>>;
}

#[async_trait]
impl CommentSource for GraphClient {
    async fn fetch_comments(&self, post_id: &str) -> anyhow::Result<Vec<GraphComment>> {
        Ok(GraphClient::fetch_comments(self, post_id).await?)
    }
}

/// Where normalized comments go. Both operations are idempotent upserts.
#[async_trait]
pub trait CommentSink: Send + Sync {
    async fn upsert_post(&self, id: &str) -> anyhow::Result<()>;

    /// Returns true if the comment was newly written, false if its id was
    /// already present.
    async fn insert_comment(&self, comment: &NewComment) -> anyhow::Result<bool>;
}

#[async_trait]
impl CommentSink for CommentStore {
    async fn upsert_post(&self, id: &str) -> anyhow::Result<()> {
        CommentStore::upsert_post(self, id).await
    }

    async fn insert_comment(&self, comment: &NewComment) -> anyhow::Result<bool> {
        CommentStore::insert_comment(self, comment).await
    }
}

#[async_trait]
impl<T: CommentSource + ?Sized> CommentSource for std::sync::Arc<T> {
    async fn fetch_comments(&self, post_id: &str) -> anyhow::Result<Vec<GraphComment>> {
        (**self).fetch_comments(post_id).await
    }
}

#[async_trait]
impl<T: CommentSink + ?Sized> CommentSink for std::sync::Arc<T> {
    async fn upsert_post(&self, id: &str) -> anyhow::Result<()> {
        (**self).upsert_post(id).await
    }

    async fn insert_comment(&self, comment: &NewComment) -> anyhow::Result<bool> {
        (**self).insert_comment(comment).await
    }
}

/// Counters for one full cycle over the configured post set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleStats {
    pub posts_ok: usize,
    pub posts_failed: usize,
    pub comments_fetched: usize,
    pub comments_persisted: usize,
    pub comments_duplicate: usize,
    pub comments_skipped_empty: usize,
    pub comment_write_failures: usize,
}

impl std::fmt::Display for CycleStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "posts: {} ok, {} failed; comments: {} fetched, {} persisted, {} duplicate, {} empty, {} write failures",
            self.posts_ok,
            self.posts_failed,
            self.comments_fetched,
            self.comments_persisted,
            self.comments_duplicate,
            self.comments_skipped_empty,
            self.comment_write_failures,
        )
    }
}

pub struct Collector<S, K> {
    source: S,
    sink: K,
    post_ids: Vec<String>,
}

impl<S: CommentSource, K: CommentSink> Collector<S, K> {
    pub fn new(source: S, sink: K, post_ids: Vec<String>) -> Self {
        Self {
            source,
            sink,
            post_ids,
        }
    }

    /// Run one full pass over the configured posts. Infallible by design:
    /// every failure is logged, counted, and contained here so the
    /// scheduling loop above never sees an error.
    pub async fn run_cycle(&self) -> CycleStats {
        let mut stats = CycleStats::default();

        for post_id in &self.post_ids {
            // The post row must exist before any of its comments; if we
            // can't ensure that, skip the fetch entirely.
            if let Err(e) = self.sink.upsert_post(post_id).await {
                warn!(post_id = post_id.as_str(), error = %e, "Failed to upsert post, skipping");
                stats.posts_failed += 1;
                continue;
            }

            let comments = match self.source.fetch_comments(post_id).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(post_id = post_id.as_str(), error = %e, "Failed to fetch comments, skipping post");
                    stats.posts_failed += 1;
                    continue;
                }
            };

            stats.comments_fetched += comments.len();
            for raw in comments {
                self.ingest_comment(post_id, raw, &mut stats).await;
            }
            stats.posts_ok += 1;
        }

        info!(%stats, "Cycle complete");
        stats
    }

    async fn ingest_comment(&self, post_id: &str, raw: GraphComment, stats: &mut CycleStats) {
        let text = raw.message.as_deref().unwrap_or("").trim();
        if text.is_empty() {
            // No analytic value; keeping these would pollute downstream
            // sentiment aggregation.
            stats.comments_skipped_empty += 1;
            return;
        }

        let comment = NewComment {
            id: raw.id,
            post_id: post_id.to_string(),
            text: text.to_string(),
            like_count: raw.like_count.unwrap_or(0),
            created_time: raw.created_time,
            commenter_hash: commenter_hash(
                raw.from.as_ref().and_then(|f| f.id.as_deref()),
            ),
        };

        match self.sink.insert_comment(&comment).await {
            Ok(true) => stats.comments_persisted += 1,
            Ok(false) => stats.comments_duplicate += 1,
            Err(e) => {
                warn!(comment_id = %comment.id, post_id, error = %e, "Failed to persist comment");
                stats.comment_write_failures += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_display_is_readable() {
        let stats = CycleStats {
            posts_ok: 2,
            posts_failed: 1,
            comments_fetched: 10,
            comments_persisted: 7,
            comments_duplicate: 2,
            comments_skipped_empty: 1,
            comment_write_failures: 0,
        };
        let s = stats.to_string();
        assert!(s.contains("2 ok"));
        assert!(s.contains("7 persisted"));
    }
}
