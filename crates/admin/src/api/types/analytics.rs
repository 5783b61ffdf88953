//! Platform analytics.

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// `data` payload of `GET /admin/analytics`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformAnalytics {
    pub analytics: Option<AnalyticsTotals>,
    pub user_growth: Vec<UserGrowthPoint>,
    pub posts_by_platform: Vec<CountBucket>,
    pub events_by_type: Vec<CountBucket>,
}

/// Engagement totals for the selected range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsTotals {
    pub total_profile_views: u64,
    pub total_link_clicks: u64,
    pub total_new_followers: u64,
    pub total_bracelet_taps: u64,
}

/// New sign-ups in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGrowthPoint {
    #[serde(rename = "_id")]
    pub period: YearMonth,
    #[serde(default)]
    pub count: u64,
}

impl UserGrowthPoint {
    /// Month label such as `Jan 2024`.
    #[must_use]
    pub fn label(&self) -> String {
        self.period.to_string()
    }
}

/// Calendar month key of a growth bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12.
    pub month: u32,
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let month = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok());
        match month {
            Some(month) => {
                let name = month.name();
                write!(f, "{} {}", name.get(..3).unwrap_or(name), self.year)
            }
            None => write!(f, "{}-{:02}", self.year, self.month),
        }
    }
}

/// Count keyed by a category (platform name, event type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBucket {
    #[serde(rename = "_id", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl CountBucket {
    /// Bucket key, with `unknown` for records that had none.
    #[must_use]
    pub fn label(&self) -> &str {
        self.key.as_deref().unwrap_or("unknown")
    }
}

/// Inclusive date range for the analytics query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_label() {
        let point: UserGrowthPoint =
            serde_json::from_str(r#"{"_id":{"year":2024,"month":1},"count":42}"#).unwrap();
        assert_eq!(point.label(), "Jan 2024");
        assert_eq!(point.count, 42);

        let odd = YearMonth {
            year: 2024,
            month: 13,
        };
        assert_eq!(odd.to_string(), "2024-13");
    }

    #[test]
    fn test_analytics_tolerates_missing_sections() {
        let analytics: PlatformAnalytics =
            serde_json::from_str(r#"{"postsByPlatform":[{"_id":null,"count":3}]}"#).unwrap();
        assert!(analytics.analytics.is_none());
        assert!(analytics.user_growth.is_empty());
        assert_eq!(analytics.posts_by_platform[0].label(), "unknown");
    }
}
