//! Platform user records.

use chrono::{DateTime, Utc};
use exhiibot_core::{Pagination, UserId};
use serde::{Deserialize, Serialize};

/// A platform user as returned by `/admin/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub role: String,
    /// Profile completeness flag.
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub followers: Vec<UserId>,
    #[serde(default)]
    pub following: Vec<UserId>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub name: Option<String>,
    pub profile_pic: Option<String>,
    pub banner_image: Option<String>,
    pub social_links: Option<SocialLinks>,
}

impl User {
    /// Display name, falling back to the handle.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.user_name)
    }

    #[must_use]
    pub fn follower_count(&self) -> usize {
        self.followers.len()
    }

    #[must_use]
    pub fn following_count(&self) -> usize {
        self.following.len()
    }
}

/// Social profile links. Every network is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub x: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub whatsapp: Option<String>,
    pub discord: Option<String>,
    pub linkedin: Option<String>,
}

impl SocialLinks {
    /// Configured links as `(network, url)` pairs.
    #[must_use]
    pub fn iter(&self) -> Vec<(&'static str, &str)> {
        [
            ("instagram", &self.instagram),
            ("x", &self.x),
            ("youtube", &self.youtube),
            ("tiktok", &self.tiktok),
            ("whatsapp", &self.whatsapp),
            ("discord", &self.discord),
            ("linkedin", &self.linkedin),
        ]
        .into_iter()
        .filter_map(|(network, link)| {
            link.as_deref()
                .filter(|l| !l.is_empty())
                .map(|l| (network, l))
        })
        .collect()
    }
}

/// `data` payload of `GET /admin/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `data` payload of single-user endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    pub user: User,
}

/// Filter for the user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Free-text search over name, handle and email.
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub is_completed: Option<bool>,
}

/// Partial update sent with `PUT /admin/users/{id}`.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl UpdateUser {
    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.bio.is_none()
            && self.is_active.is_none()
            && self.is_completed.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_user() {
        let user: User = serde_json::from_str(
            r#"{
                "_id": "u1",
                "userName": "tapper",
                "role": "user",
                "isCompleted": false,
                "isActive": true,
                "email": "tapper@example.com",
                "followers": ["u2", "u3"],
                "created_at": "2024-01-10T09:30:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(user.id.as_str(), "u1");
        assert!(user.is_active);
        assert_eq!(user.follower_count(), 2);
        assert_eq!(user.following_count(), 0);
        assert!(user.tags.is_empty());
        assert_eq!(user.display_name(), "tapper");
    }

    #[test]
    fn test_social_links_skip_empty() {
        let links = SocialLinks {
            instagram: Some("https://instagram.com/tapper".to_string()),
            x: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(links.iter(), vec![("instagram", "https://instagram.com/tapper")]);
    }

    #[test]
    fn test_update_user_serializes_only_set_fields() {
        let update = UpdateUser {
            is_active: Some(false),
            bio: Some("Bracelet collector".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"bio": "Bracelet collector", "isActive": false})
        );
        assert!(UpdateUser::default().is_empty());
    }
}
