//! Placed bracelet orders ("carts").

use chrono::{DateTime, Utc};
use exhiibot_core::{CartId, OrderStatus, OrderTimeline, Pagination, UserId};
use serde::{Deserialize, Serialize};

use super::Product;

/// A placed order with its shipping details and product snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOrder {
    #[serde(rename = "_id")]
    pub id: CartId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
    pub user_id: Option<UserId>,
    pub product: Option<Product>,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl CartOrder {
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Fulfilment status derived from the order age.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> OrderStatus {
        OrderStatus::derive(self.created_at, now)
    }

    #[must_use]
    pub fn timeline(&self) -> OrderTimeline {
        OrderTimeline::estimate(self.created_at)
    }
}

/// `data` payload of `GET /admin/carts`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartsData {
    #[serde(default)]
    pub carts: Vec<CartOrder>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_order_status_from_age() {
        let order: CartOrder = serde_json::from_str(
            r#"{
                "_id": "c1",
                "firstName": "Ada",
                "lastName": "Obi",
                "shippingAddress": "12 Marina Rd",
                "zipCode": "100001",
                "country": "NG",
                "userId": "u1",
                "product": {
                    "_id": "p1",
                    "productName": "Glow",
                    "productDesc": "LED bracelet",
                    "productImg": "",
                    "productPrice": "12.00",
                    "created_at": "2024-01-01T00:00:00Z"
                },
                "created_at": "2024-03-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        let placed = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(order.customer_name(), "Ada Obi");
        assert_eq!(order.status(placed + Duration::hours(5)), OrderStatus::Processing);
        assert_eq!(order.status(placed + Duration::hours(30)), OrderStatus::Shipped);
        assert_eq!(order.status(placed + Duration::days(4)), OrderStatus::Delivered);
        assert_eq!(order.timeline().shipped_at, placed + Duration::days(1));
    }

    #[test]
    fn test_bad_embedded_price_keeps_page() {
        let data: CartsData = serde_json::from_str(
            r#"{
                "carts": [
                    {"_id": "c1", "product": {"_id": "p1", "productPrice": "12"}, "created_at": "2024-03-01T12:00:00Z"},
                    {"_id": "c2", "product": {"_id": "p1", "productPrice": ""}, "created_at": "2024-03-02T12:00:00Z"}
                ],
                "pagination": {"total": 2, "page": 1, "limit": 20, "pages": 1}
            }"#,
        )
        .unwrap();

        assert_eq!(data.carts.len(), 2);
        let prices: Vec<_> = data
            .carts
            .iter()
            .map(|c| c.product.as_ref().and_then(Product::price))
            .collect();
        assert_eq!(prices[0].map(|p| p.to_string()).as_deref(), Some("₦12.00"));
        assert_eq!(prices[1], None);
    }
}
