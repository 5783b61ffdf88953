//! Platform activity feed.

use chrono::{DateTime, Utc};
use exhiibot_core::{ActivityId, Pagination, UserId};
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// One entry in the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: ActivityId,
    pub user: Option<UserSummary>,
    pub actor: Option<Actor>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Who performed an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    pub profile_pic: Option<String>,
}

/// `data` payload of `GET /admin/activities`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitiesData {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Filter for the activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub kind: Option<String>,
}
