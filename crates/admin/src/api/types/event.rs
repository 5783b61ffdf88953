//! Community events promoted on the platform.

use chrono::{DateTime, Utc};
use exhiibot_core::{EventId, Pagination, event_is_active};
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// A promoted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: EventId,
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub cover_image: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub ticket_url: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event is enabled and has not yet ended.
    #[must_use]
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        event_is_active(self.is_active, self.end_date, now)
    }
}

/// `data` payload of `GET /admin/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsData {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Filter for the event list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub kind: Option<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn event(is_active: bool, end_date: DateTime<Utc>) -> Event {
        Event {
            id: EventId::new("e1"),
            user: None,
            title: "Tap Night".to_string(),
            description: String::new(),
            kind: "meetup".to_string(),
            cover_image: None,
            start_date: end_date - Duration::hours(4),
            end_date,
            ticket_url: None,
            location: Some("Lagos".to_string()),
            is_active,
            created_at: end_date - Duration::days(10),
        }
    }

    #[test]
    fn test_is_running_requires_flag_and_future_end() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();

        assert!(event(true, now + Duration::hours(1)).is_running(now));
        assert!(!event(false, now + Duration::hours(1)).is_running(now));
        assert!(!event(true, now - Duration::hours(1)).is_running(now));
        assert!(!event(true, now).is_running(now));
    }

    #[test]
    fn test_type_field_maps_to_kind() {
        let event: Event = serde_json::from_str(
            r#"{
                "_id": "e9",
                "title": "Launch",
                "type": "concert",
                "startDate": "2024-06-01T18:00:00Z",
                "endDate": "2024-06-01T23:00:00Z",
                "isActive": true,
                "created_at": "2024-05-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(event.kind, "concert");
        assert!(event.user.is_none());
    }
}
