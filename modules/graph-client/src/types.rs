use serde::Deserialize;

/// A single comment as returned by the Graph API.
///
/// Everything except `id` and `created_time` is optional on the wire:
/// comments can have no text (sticker/photo replies), no like count, and
/// no author when the commenter's privacy settings hide them.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphComment {
    pub id: String,
    pub message: Option<String>,
    pub created_time: String,
    pub like_count: Option<i64>,
    pub from: Option<CommentAuthor>,
}

/// Author info nested inside a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentAuthor {
    pub id: Option<String>,
}

/// The `comments` field of a post node. The API omits it entirely for
/// posts with no comments, so the whole struct is optional upstream.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CommentConnection {
    #[serde(default)]
    pub data: Vec<GraphComment>,
}

/// Response envelope for a post node queried with a `comments{...}`
/// field selector.
#[derive(Debug, Clone, Deserialize)]
pub struct PostEnvelope {
    pub comments: Option<CommentConnection>,
}

impl PostEnvelope {
    /// Comments from the envelope, treating a missing `comments` field
    /// as an empty list.
    pub fn into_comments(self) -> Vec<GraphComment> {
        self.comments.unwrap_or_default().data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_envelope() {
        let body = r#"{
            "id": "P1",
            "comments": {
                "data": [
                    {
                        "id": "C1",
                        "message": " hello ",
                        "created_time": "2024-01-01T00:00:00Z",
                        "like_count": 3,
                        "from": {"id": "U1"}
                    }
                ]
            }
        }"#;

        let env: PostEnvelope = serde_json::from_str(body).unwrap();
        let comments = env.into_comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, "C1");
        assert_eq!(comments[0].message.as_deref(), Some(" hello "));
        assert_eq!(comments[0].like_count, Some(3));
        assert_eq!(
            comments[0].from.as_ref().and_then(|f| f.id.as_deref()),
            Some("U1")
        );
    }

    #[test]
    fn missing_comments_field_is_empty() {
        let env: PostEnvelope = serde_json::from_str(r#"{"id": "P2"}"#).unwrap();
        assert!(env.into_comments().is_empty());
    }

    #[test]
    fn comment_with_only_required_fields() {
        let body = r#"{
            "comments": {
                "data": [{"id": "C9", "created_time": "2024-02-02T12:00:00+0000"}]
            }
        }"#;

        let env: PostEnvelope = serde_json::from_str(body).unwrap();
        let comments = env.into_comments();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].message.is_none());
        assert!(comments[0].like_count.is_none());
        assert!(comments[0].from.is_none());
    }

    #[test]
    fn empty_data_array() {
        let body = r#"{"comments": {"data": []}}"#;
        let env: PostEnvelope = serde_json::from_str(body).unwrap();
        assert!(env.into_comments().is_empty());
    }
}
