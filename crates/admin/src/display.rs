//! Text formatting for records shown to operators.

use chrono::{DateTime, Utc};
use exhiibot_core::{OrderStatus, Price};

use crate::api::{CartOrder, User};

/// Placeholder for an empty description.
pub const NO_DESCRIPTION: &str = "No description";

/// Format a timestamp as a calendar date (e.g. `Jan 5, 2024`).
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a timestamp with minutes (e.g. `Jan 5, 2024 14:03 UTC`).
#[must_use]
pub fn format_datetime(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y %H:%M UTC").to_string()
}

/// Shorten `text` to `max` characters, appending `...` when cut.
///
/// Empty or blank text becomes [`NO_DESCRIPTION`].
#[must_use]
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.trim().is_empty() {
        return NO_DESCRIPTION.to_string();
    }
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max).collect();
    short.push_str("...");
    short
}

/// Format a price (e.g. `₦49,999.00`), or `-` when there is none.
#[must_use]
pub fn format_price(price: Option<Price>) -> String {
    price.map_or_else(|| "-".to_string(), |price| price.display())
}

/// Title-cased status label for an order (e.g. `Shipped`).
#[must_use]
pub const fn order_status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Processing => "Processing",
        OrderStatus::Shipped => "Shipped",
        OrderStatus::Delivered => "Delivered",
    }
}

/// Shipping address on one line.
#[must_use]
pub fn shipping_line(order: &CartOrder) -> String {
    [
        order.shipping_address.as_str(),
        order.zip_code.as_str(),
        order.country.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.trim().is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Follower and following counts (e.g. `12 followers · 3 following`).
#[must_use]
pub fn follow_counts(user: &User) -> String {
    format!(
        "{} followers · {} following",
        user.follower_count(),
        user.following_count()
    )
}

/// `yes`/`no` for boolean flags in tables.
#[must_use]
pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 14, 3, 0).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2024");
        assert_eq!(format_datetime(date), "Jan 5, 2024 14:03 UTC");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("", 10), "No description");
        assert_eq!(truncate_text("   ", 10), "No description");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_text("glow in the dark", 4), "glow...");
        assert_eq!(truncate_text("ñandú bracelet", 5), "ñandú...");
    }

    #[test]
    fn test_format_price() {
        let price = Price::parse("49999").unwrap();
        assert_eq!(format_price(Some(price)), "₦49,999.00");
        assert_eq!(format_price(None), "-");
    }

    #[test]
    fn test_follow_counts() {
        let user: User = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "followers": ["a", "b"],
            "following": ["c"],
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(follow_counts(&user), "2 followers · 1 following");
    }
}
