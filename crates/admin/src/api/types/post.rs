//! Social posts shared through the platform.

use chrono::{DateTime, Utc};
use exhiibot_core::{Pagination, PostId};
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// A shared social post with engagement counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub link_preview: Option<LinkPreview>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub tap_count: u64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Likes, comments, shares and retweets combined.
    #[must_use]
    pub const fn engagement(&self) -> u64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
            .saturating_add(self.retweets)
    }
}

/// Open Graph preview of a linked page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// `data` payload of `GET /admin/posts`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsData {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Filter for the post list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub platform: Option<String>,
    pub is_published: Option<bool>,
}
