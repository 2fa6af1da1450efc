//! Reddit JSON payloads and their conversion into forum types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{CommentNode, ForumComment, ForumError, ForumPost, PostDetail};

pub const KIND_COMMENT: &str = "t1";
pub const KIND_LINK: &str = "t3";

const UNKNOWN_AUTHOR: &str = "Unknown";
const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// A listing child. `data` is decoded once `kind` is known.
#[derive(Debug, Deserialize)]
pub struct Thing {
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct LinkData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub url: String,
    pub author: Option<String>,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub upvote_ratio: f64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub subreddit: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentData {
    #[serde(default)]
    pub id: String,
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub parent_id: String,
    /// Either an empty string or a nested listing.
    #[serde(default)]
    pub replies: Value,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

const fn default_expires_in() -> u64 {
    3600
}

fn author_name(author: Option<String>) -> String {
    match author {
        Some(name) if !name.is_empty() && name != DELETED_AUTHOR => name,
        _ => UNKNOWN_AUTHOR.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp(created_utc: f64) -> Option<DateTime<Utc>> {
    if !created_utc.is_finite() {
        return None;
    }
    DateTime::from_timestamp(created_utc.trunc() as i64, 0)
}

fn decode<T: DeserializeOwned>(thing: Thing) -> Result<T, ForumError> {
    serde_json::from_value(thing.data)
        .map_err(|err| ForumError::Decode(format!("{} payload: {err}", thing.kind)))
}

impl From<LinkData> for ForumPost {
    fn from(data: LinkData) -> Self {
        Self {
            title: data.title,
            content: data.selftext,
            url: data.url,
            author: author_name(data.author),
            created_utc: data.created_utc,
            created_at: timestamp(data.created_utc),
        }
    }
}

impl From<CommentData> for ForumComment {
    fn from(data: CommentData) -> Self {
        Self {
            id: data.id,
            author: author_name(data.author),
            body: data.body,
            score: data.score,
            created_utc: data.created_utc,
            parent_id: data.parent_id,
        }
    }
}

/// Posts of a listing, in listing order. Non-post children are skipped.
///
/// # Errors
/// Returns `ForumError::Decode` if a post payload is malformed.
pub fn posts_from_listing(listing: Listing) -> Result<Vec<ForumPost>, ForumError> {
    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == KIND_LINK)
        .map(|thing| decode::<LinkData>(thing).map(ForumPost::from))
        .collect()
}

/// Comment forest of a listing. `more` placeholders are dropped.
///
/// # Errors
/// Returns `ForumError::Decode` if a comment payload is malformed.
pub fn comment_forest(listing: Listing) -> Result<Vec<CommentNode>, ForumError> {
    let mut nodes = Vec::with_capacity(listing.data.children.len());
    for thing in listing.data.children {
        if thing.kind != KIND_COMMENT {
            continue;
        }
        let mut data: CommentData = decode(thing)?;
        let replies = match data.replies.take() {
            replies @ Value::Object(_) => {
                let nested: Listing = serde_json::from_value(replies)
                    .map_err(|err| ForumError::Decode(format!("replies: {err}")))?;
                comment_forest(nested)?
            }
            _ => Vec::new(),
        };
        nodes.push(CommentNode {
            comment: ForumComment::from(data),
            replies,
        });
    }
    Ok(nodes)
}

/// Splits the `/comments/<id>` response into the post and its comment forest.
///
/// # Errors
/// Returns `ForumError::Decode` if the response does not hold a post listing
/// followed by a comment listing, or `ForumError::NotFound` if the post
/// listing is empty.
pub fn post_with_comments(
    post_id: &str,
    listings: Vec<Listing>,
) -> Result<(LinkData, Vec<CommentNode>), ForumError> {
    let mut listings = listings.into_iter();
    let (Some(post_listing), Some(comment_listing)) = (listings.next(), listings.next()) else {
        return Err(ForumError::Decode(
            "expected a post listing followed by a comment listing".to_string(),
        ));
    };
    let thing = post_listing
        .data
        .children
        .into_iter()
        .find(|thing| thing.kind == KIND_LINK)
        .ok_or_else(|| ForumError::NotFound(post_id.to_string()))?;
    let link: LinkData = decode(thing)?;
    let forest = comment_forest(comment_listing)?;
    Ok((link, forest))
}

impl PostDetail {
    pub(crate) fn from_parts(mut link: LinkData, comments: Vec<ForumComment>) -> Self {
        let score = link.score;
        let upvote_ratio = link.upvote_ratio;
        let num_comments = link.num_comments;
        let subreddit = std::mem::take(&mut link.subreddit);
        Self {
            post: ForumPost::from(link),
            score,
            upvote_ratio,
            num_comments,
            subreddit,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn comment(id: &str, author: Value, replies: Value) -> Value {
        json!({
            "kind": "t1",
            "data": {
                "id": id,
                "author": author,
                "body": format!("body {id}"),
                "score": 3,
                "created_utc": 1_700_000_000.0,
                "parent_id": "t3_abc",
                "replies": replies
            }
        })
    }

    fn listing(children: Vec<Value>) -> Listing {
        serde_json::from_value(json!({ "kind": "Listing", "data": { "children": children } }))
            .expect("listing")
    }

    #[test]
    fn deleted_and_missing_authors_become_unknown() {
        assert_eq!(author_name(Some("[deleted]".to_string())), "Unknown");
        assert_eq!(author_name(None), "Unknown");
        assert_eq!(author_name(Some(String::new())), "Unknown");
        assert_eq!(author_name(Some("trader42".to_string())), "trader42");
    }

    #[test]
    fn comment_forest_nests_replies_and_skips_more() {
        let nested = json!({
            "kind": "Listing",
            "data": { "children": [comment("b", json!("bob"), json!(""))] }
        });
        let forest = comment_forest(listing(vec![
            comment("a", json!("alice"), nested),
            json!({ "kind": "more", "data": { "count": 12, "children": ["x", "y"] } }),
            comment("c", Value::Null, json!("")),
        ]))
        .expect("forest");

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].comment.id, "a");
        assert_eq!(forest[0].replies.len(), 1);
        assert_eq!(forest[0].replies[0].comment.author, "bob");
        assert_eq!(forest[1].comment.author, "Unknown");
        assert!(forest[1].replies.is_empty());
    }

    #[test]
    fn posts_keep_listing_order() {
        let posts = posts_from_listing(listing(vec![
            json!({ "kind": "t3", "data": { "title": "first", "author": "a", "created_utc": 1_700_000_000.0 } }),
            json!({ "kind": "t3", "data": { "title": "second", "author": "[deleted]" } }),
        ]))
        .expect("posts");

        let titles: Vec<&str> = posts.iter().map(|post| post.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
        assert_eq!(posts[1].author, "Unknown");
        assert_eq!(
            posts[0].created_at.map(|at| at.to_rfc3339()),
            Some("2023-11-14T22:13:20+00:00".to_string())
        );
    }

    #[test]
    fn empty_post_listing_is_not_found() {
        let err = post_with_comments("zzz", vec![listing(Vec::new()), listing(Vec::new())])
            .expect_err("no post");
        assert!(matches!(err, ForumError::NotFound(id) if id == "zzz"));
    }
}
