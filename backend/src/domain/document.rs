//! Aggregated per-user documents, the persisted shape of the mirror.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::post::{Comment, Post};
use super::user::User;

/// A post together with the comments that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostDocument {
    /// The post's own fields, flattened to the top level.
    #[serde(flatten)]
    pub post: Post,
    /// Comments whose `postId` matches this post, in their original order.
    pub comments: Vec<Comment>,
}

/// A user together with the nested posts that reference them.
///
/// This is the only derived entity in the system; it has no identity beyond
/// the user's natural key and is recomputed wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDocument {
    /// The user's own fields, flattened to the top level.
    #[serde(flatten)]
    pub user: User,
    /// Posts whose `userId` matches this user, in their original order.
    /// Always present, empty when the user has no posts.
    pub posts: Vec<PostDocument>,
}

impl UserDocument {
    /// Natural key of the underlying user.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_flattens_user_fields() {
        let document = UserDocument {
            user: User {
                id: 1,
                name: "Leanne Graham".into(),
                username: "Bret".into(),
                email: "Sincere@april.biz".into(),
                address: None,
                phone: None,
                website: None,
                company: None,
            },
            posts: vec![],
        };
        let json = serde_json::to_value(&document).expect("serialise document");
        assert_eq!(json.get("id").and_then(serde_json::Value::as_i64), Some(1));
        assert_eq!(
            json.get("posts").and_then(serde_json::Value::as_array).map(Vec::len),
            Some(0)
        );
    }
}
