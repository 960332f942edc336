// Postgres persistence for posts and comments. Both writes are
// insert-if-absent: re-ingesting the same remote data is a no-op.

use anyhow::Result;
use sqlx::PgPool;

/// A comment ready for persistence: text trimmed and non-empty,
/// commenter identity already anonymized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub id: String,
    pub post_id: String,
    pub text: String,
    pub like_count: i64,
    /// Provider timestamp, stored verbatim.
    pub created_time: String,
    pub commenter_hash: Option<String>,
}

pub struct CommentStore {
    pool: PgPool,
}

impl CommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded SQL migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Insert the post row if it isn't already there. Duplicate ids are a
    /// no-op, never a conflict error, so concurrent cycles are safe.
    pub async fn upsert_post(&self, id: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id) VALUES ($1)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a comment if its id hasn't been seen. Returns whether a row
    /// was actually written, so the cycle can count new vs. re-fetched.
    pub async fn insert_comment(&self, c: &NewComment) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, text, like_count, created_time, commenter_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&c.id)
        .bind(&c.post_id)
        .bind(&c.text)
        .bind(c.like_count)
        .bind(&c.created_time)
        .bind(&c.commenter_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Close the pool, letting in-flight writes drain first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
