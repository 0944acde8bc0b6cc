//! Post and comment records mirrored from the upstream test API.
//!
//! Foreign keys are optional at the type level: a record whose payload lacks
//! its key is carried without one and excluded from aggregation as an orphan
//! rather than rejected.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A post authored by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Upstream-assigned post identifier.
    pub id: i64,
    /// Foreign key to [`super::User::id`]; absent for orphan payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
}

/// A comment left on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Upstream-assigned comment identifier.
    pub id: i64,
    /// Foreign key to [`Post::id`]; absent for orphan payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,
    /// Commenter display name.
    pub name: String,
    /// Commenter email.
    pub email: String,
    /// Comment body text.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_decodes_without_foreign_key() {
        let post: Post = serde_json::from_str(r#"{"id": 7, "title": "t", "body": "b"}"#)
            .expect("payload without userId must decode");
        assert_eq!(post.user_id, None);
    }

    #[test]
    fn comment_round_trips_foreign_key_in_camel_case() {
        let comment = Comment {
            id: 100,
            post_id: Some(10),
            name: "alias".into(),
            email: "Eliseo@gardner.biz".into(),
            body: "laudantium".into(),
        };
        let json = serde_json::to_value(&comment).expect("serialise comment");
        assert_eq!(json.get("postId").and_then(serde_json::Value::as_i64), Some(10));
    }
}
