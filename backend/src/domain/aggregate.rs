//! The aggregation core: a nested equi-join over three flat record sets.
//!
//! Pure and synchronous. All I/O (the concurrent upstream fetches feeding it
//! and the replace-all persistence consuming its output) lives behind ports.

use std::collections::HashMap;

use super::document::{PostDocument, UserDocument};
use super::post::{Comment, Post};
use super::user::User;

/// Merge users, posts, and comments into nested per-user documents.
///
/// Posts attach to the user whose `id` matches their `userId`; comments
/// attach to the post whose `id` matches their `postId`. Original relative
/// order is preserved at every level, and the output user order follows the
/// input user order.
///
/// Records are grouped by foreign key in a single pass each, so the join is
/// linear in the input sizes rather than rescanning per user.
///
/// Orphans — posts without a matching user, comments without a matching
/// post, and records missing their foreign key outright — are silently
/// dropped, matching the observed behaviour of the system this mirrors.
#[must_use]
pub fn aggregate(users: Vec<User>, posts: Vec<Post>, comments: Vec<Comment>) -> Vec<UserDocument> {
    let mut comments_by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    for comment in comments {
        let Some(post_id) = comment.post_id else {
            continue;
        };
        comments_by_post.entry(post_id).or_default().push(comment);
    }

    let mut posts_by_user: HashMap<i64, Vec<PostDocument>> = HashMap::new();
    for post in posts {
        let Some(user_id) = post.user_id else {
            continue;
        };
        let comments = comments_by_post.remove(&post.id).unwrap_or_default();
        posts_by_user
            .entry(user_id)
            .or_default()
            .push(PostDocument { post, comments });
    }

    let mut documents = Vec::with_capacity(users.len());
    for user in users {
        let posts = posts_by_user.remove(&user.id).unwrap_or_default();
        documents.push(UserDocument { user, posts });
    }
    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> User {
        User {
            id,
            name: format!("user {id}"),
            username: format!("handle{id}"),
            email: format!("user{id}@example.net"),
            address: None,
            phone: None,
            website: None,
            company: None,
        }
    }

    fn post(id: i64, user_id: impl Into<Option<i64>>) -> Post {
        Post {
            id,
            user_id: user_id.into(),
            title: format!("post {id}"),
            body: "body".into(),
        }
    }

    fn comment(id: i64, post_id: impl Into<Option<i64>>) -> Comment {
        Comment {
            id,
            post_id: post_id.into(),
            name: format!("comment {id}"),
            email: "commenter@example.net".into(),
            body: "body".into(),
        }
    }

    #[test]
    fn nests_posts_and_comments_by_foreign_key() {
        let documents = aggregate(
            vec![user(1)],
            vec![post(10, 1), post(11, 2)],
            vec![comment(100, 10)],
        );

        assert_eq!(documents.len(), 1);
        let posts = &documents[0].posts;
        assert_eq!(posts.len(), 1, "post 11 references an absent user");
        assert_eq!(posts[0].post.id, 10);
        assert_eq!(posts[0].comments.len(), 1);
        assert_eq!(posts[0].comments[0].id, 100);
    }

    #[test]
    fn user_without_posts_gets_empty_list_not_missing() {
        let documents = aggregate(vec![user(1)], vec![], vec![]);
        assert_eq!(documents.len(), 1);
        assert!(documents[0].posts.is_empty());

        let json = serde_json::to_value(&documents[0]).expect("serialise document");
        assert_eq!(
            json.get("posts").and_then(serde_json::Value::as_array).map(Vec::len),
            Some(0),
            "posts must serialise as [], not be omitted"
        );
    }

    #[test]
    fn post_without_comments_gets_empty_list() {
        let documents = aggregate(vec![user(1)], vec![post(10, 1)], vec![]);
        assert!(documents[0].posts[0].comments.is_empty());
    }

    #[test]
    fn preserves_input_order_at_every_level() {
        let documents = aggregate(
            vec![user(2), user(1)],
            vec![post(12, 1), post(10, 1), post(11, 2)],
            vec![comment(102, 10), comment(100, 10), comment(101, 12)],
        );

        let ids: Vec<i64> = documents.iter().map(UserDocument::user_id).collect();
        assert_eq!(ids, vec![2, 1], "output follows input user order");

        let user_one = &documents[1];
        let post_ids: Vec<i64> = user_one.posts.iter().map(|p| p.post.id).collect();
        assert_eq!(post_ids, vec![12, 10], "posts keep their relative order");

        let comment_ids: Vec<i64> = user_one.posts[1].comments.iter().map(|c| c.id).collect();
        assert_eq!(comment_ids, vec![102, 100], "comments keep their relative order");
    }

    #[test]
    fn drops_orphans_silently() {
        let documents = aggregate(
            vec![user(1)],
            vec![post(10, 1), post(20, 99), post(30, None)],
            vec![comment(100, 10), comment(200, 20), comment(300, 555), comment(400, None)],
        );

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].posts.len(), 1);
        let all_comment_ids: Vec<i64> = documents[0]
            .posts
            .iter()
            .flat_map(|p| p.comments.iter().map(|c| c.id))
            .collect();
        assert_eq!(
            all_comment_ids,
            vec![100],
            "comments attached to orphan posts must not surface anywhere"
        );
    }

    #[test]
    fn every_post_lands_on_exactly_the_matching_user() {
        let users: Vec<User> = (1..=4).map(user).collect();
        let posts: Vec<Post> = (0..20).map(|n| post(n, n % 4 + 1)).collect();

        let documents = aggregate(users, posts.clone(), vec![]);

        for document in &documents {
            let expected: Vec<i64> = posts
                .iter()
                .filter(|p| p.user_id == Some(document.user_id()))
                .map(|p| p.id)
                .collect();
            let actual: Vec<i64> = document.posts.iter().map(|p| p.post.id).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let users = vec![user(1), user(2)];
        let posts = vec![post(10, 1), post(11, 2), post(12, None)];
        let comments = vec![comment(100, 10), comment(101, 11)];

        let first = aggregate(users.clone(), posts.clone(), comments.clone());
        let second = aggregate(users, posts, comments);
        assert_eq!(first, second);
    }
}
