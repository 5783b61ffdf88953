//! Bracelet products sold on the platform.

use chrono::{DateTime, Utc};
use exhiibot_core::{PLATFORM_CURRENCY, Pagination, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A product record, also embedded as a snapshot in orders.
///
/// `productPrice` arrives as a decimal string or a JSON number. A blank or
/// unparseable value becomes `None` instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_desc: String,
    #[serde(default)]
    pub product_img: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub product_price: Option<Decimal>,
    #[serde(rename = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price in the platform currency, `None` when the record has no usable
    /// amount.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        self.product_price
            .map(|amount| Price::new(amount, PLATFORM_CURRENCY))
    }
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(raw)) => Price::parse(&raw).ok(),
        Some(serde_json::Value::Number(n)) => Price::parse(&n.to_string()).ok(),
        _ => None,
    };
    Ok(price.map(|price| price.amount))
}

/// `data` payload of `GET /admin/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `data` payload of single-product endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductData {
    pub product: Product,
}

/// Filter for the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
}

/// Body of `POST /admin/products`. The price is sent as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_name: String,
    pub product_desc: String,
    pub product_img: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
}

/// Body of `PUT /admin/products/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_img: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub product_price: Option<Decimal>,
}
