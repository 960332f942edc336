pub mod error;
pub mod types;

pub use error::{GraphError, Result};
pub use types::{CommentAuthor, CommentConnection, GraphComment, PostEnvelope};

use std::time::Duration;

/// Default Graph API base endpoint.
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v18.0";

/// Field selector asking for one page of comments with the sub-fields the
/// collector persists. No cursor handling: one page of up to 500 is the cap.
const COMMENT_FIELDS: &str = "comments.limit(500){id,message,created_time,like_count,from}";

/// Per-request timeout. A fetch that never returns must eventually fail.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    pub fn new(base_url: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            access_token,
        }
    }

    /// Fetch the comments currently visible on a post.
    ///
    /// A response without a `comments` field (post with no comments, or a
    /// field the token can't read) is an empty list, not an error. Network
    /// failures, non-2xx statuses, and unparseable bodies are errors for
    /// the caller to isolate per post.
    pub async fn fetch_comments(&self, post_id: &str) -> Result<Vec<GraphComment>> {
        let url = format!("{}/{}", self.base_url, post_id);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("fields", COMMENT_FIELDS),
                ("access_token", self.access_token.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GraphError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: PostEnvelope = resp.json().await.map_err(|e| {
            GraphError::Parse(e.to_string())
        })?;

        let comments = envelope.into_comments();
        tracing::debug!(post_id, count = comments.len(), "Fetched comments");
        Ok(comments)
    }
}
