//! Status enums and the client-side status derivation rules.
//!
//! The platform API does not report an order status, and an event's stored
//! `isActive` flag does not account for events that have already ended. Both
//! are derived here from timestamps. The rules are placeholders agreed with
//! operations; if the API starts returning a status, prefer the server value.
//!
//! Every function takes `now` explicitly so the rules stay pure.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Whole days after creation before an order counts as shipped.
pub const SHIPPED_AFTER_DAYS: i64 = 1;

/// Whole days after creation before an order counts as delivered.
pub const DELIVERED_AFTER_DAYS: i64 = 3;

/// Derived fulfilment status of a bracelet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed less than a day ago.
    Processing,
    /// Placed one to three days ago.
    Shipped,
    /// Placed three or more days ago.
    Delivered,
}

impl OrderStatus {
    /// Derive the status from the order's creation time.
    ///
    /// Elapsed time is counted in whole days: under one day is
    /// [`Processing`](Self::Processing), under three is
    /// [`Shipped`](Self::Shipped), anything else is
    /// [`Delivered`](Self::Delivered). A creation time in the future counts
    /// as processing.
    #[must_use]
    pub fn derive(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed_days = (now - created_at).num_days();

        if elapsed_days < SHIPPED_AFTER_DAYS {
            Self::Processing
        } else if elapsed_days < DELIVERED_AFTER_DAYS {
            Self::Shipped
        } else {
            Self::Delivered
        }
    }

    /// Lowercase label used in tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated milestones shown on the order detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTimeline {
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Estimated ship date.
    pub shipped_at: DateTime<Utc>,
    /// Estimated delivery date.
    pub delivered_at: DateTime<Utc>,
}

impl OrderTimeline {
    /// Estimate milestones from the creation time.
    #[must_use]
    pub fn estimate(created_at: DateTime<Utc>) -> Self {
        Self {
            placed_at: created_at,
            shipped_at: created_at + Duration::days(SHIPPED_AFTER_DAYS),
            delivered_at: created_at + Duration::days(DELIVERED_AFTER_DAYS),
        }
    }

    /// Milestones reached by `status`, in order, as `(label, date)` pairs.
    #[must_use]
    pub fn reached(&self, status: OrderStatus) -> Vec<(&'static str, DateTime<Utc>)> {
        let mut steps = vec![("Order placed", self.placed_at)];
        if matches!(status, OrderStatus::Shipped | OrderStatus::Delivered) {
            steps.push(("Shipped", self.shipped_at));
        }
        if status == OrderStatus::Delivered {
            steps.push(("Delivered", self.delivered_at));
        }
        steps
    }
}

/// Whether an event should be shown as running.
///
/// An event is active only when its stored flag is set *and* its end date is
/// strictly in the future. Either condition failing makes it inactive.
#[must_use]
pub fn event_is_active(is_active: bool, end_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    is_active && end_date > now
}

/// Review state of a referral application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Wire value of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("invalid application status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn hours_ago(hours: i64) -> DateTime<Utc> {
        now() - Duration::hours(hours)
    }

    #[test]
    fn test_order_status_processing_window() {
        assert_eq!(OrderStatus::derive(hours_ago(0), now()), OrderStatus::Processing);
        assert_eq!(OrderStatus::derive(hours_ago(23), now()), OrderStatus::Processing);
        let almost_a_day = now() - Duration::hours(24) + Duration::seconds(1);
        assert_eq!(OrderStatus::derive(almost_a_day, now()), OrderStatus::Processing);
    }

    #[test]
    fn test_order_status_shipped_window() {
        assert_eq!(OrderStatus::derive(hours_ago(24), now()), OrderStatus::Shipped);
        assert_eq!(OrderStatus::derive(hours_ago(47), now()), OrderStatus::Shipped);
        assert_eq!(OrderStatus::derive(hours_ago(71), now()), OrderStatus::Shipped);
        let almost_three_days = now() - Duration::hours(72) + Duration::seconds(1);
        assert_eq!(
            OrderStatus::derive(almost_three_days, now()),
            OrderStatus::Shipped
        );
    }

    #[test]
    fn test_order_status_delivered_window() {
        assert_eq!(OrderStatus::derive(hours_ago(72), now()), OrderStatus::Delivered);
        assert_eq!(OrderStatus::derive(hours_ago(24 * 30), now()), OrderStatus::Delivered);
    }

    #[test]
    fn test_order_status_future_creation_is_processing() {
        assert_eq!(OrderStatus::derive(hours_ago(-5), now()), OrderStatus::Processing);
        assert_eq!(OrderStatus::derive(hours_ago(-50), now()), OrderStatus::Processing);
    }

    #[test]
    fn test_order_timeline() {
        let placed = hours_ago(80);
        let timeline = OrderTimeline::estimate(placed);
        assert_eq!(timeline.shipped_at - placed, Duration::days(1));
        assert_eq!(timeline.delivered_at - placed, Duration::days(3));

        assert_eq!(timeline.reached(OrderStatus::Processing).len(), 1);
        assert_eq!(timeline.reached(OrderStatus::Shipped).len(), 2);
        let delivered = timeline.reached(OrderStatus::Delivered);
        assert_eq!(delivered.last().unwrap().0, "Delivered");
    }

    #[test]
    fn test_event_active_requires_flag_and_future_end() {
        let future = now() + Duration::days(2);
        let past = now() - Duration::days(2);

        assert!(event_is_active(true, future, now()));
        assert!(!event_is_active(false, future, now()));
        assert!(!event_is_active(true, past, now()));
        assert!(!event_is_active(false, past, now()));
    }

    #[test]
    fn test_event_ending_now_is_inactive() {
        assert!(!event_is_active(true, now(), now()));
    }

    #[test]
    fn test_application_status_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
        assert!("revoked".parse::<ApplicationStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Approved).unwrap(),
            "\"approved\""
        );
    }
}
