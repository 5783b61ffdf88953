//! Order browsing commands.

use std::io::Write;

use chrono::Utc;
use exhiibot_admin::api::Product;
use exhiibot_admin::display::{
    format_date, format_datetime, format_price, order_status_label, shipping_line,
};
use exhiibot_admin::listing::ListQuery;
use exhiibot_admin::resources::{OrderList, OrderSource};
use exhiibot_admin::{ApiClient, AppError};

use super::load_list;
use crate::output::{field, footer, table};

fn order_list(client: &ApiClient, page: u32, limit: u32) -> OrderList {
    OrderList::with_query(OrderSource::new(client.clone()), ListQuery {
        page,
        limit,
        filter: (),
    })
}

pub async fn list<W: Write>(
    client: &ApiClient,
    out: &mut W,
    page: u32,
    limit: u32,
) -> Result<(), AppError> {
    let state = load_list(&order_list(client, page, limit)).await?;
    let now = Utc::now();

    let rows: Vec<Vec<String>> = state
        .items
        .iter()
        .map(|order| {
            let product = order.product.as_ref();
            vec![
                order.id.to_string(),
                order.customer_name(),
                product.map_or_else(|| "-".to_string(), |p| p.product_name.clone()),
                format_price(product.and_then(Product::price)),
                order_status_label(order.status(now)).to_string(),
                format_date(order.created_at),
            ]
        })
        .collect();

    table(out, &["ID", "Customer", "Product", "Price", "Status", "Placed"], &rows)?;
    footer(out, rows.len(), &state.pagination)?;
    Ok(())
}

/// Show one order. Orders have no detail endpoint, so the given page is
/// fetched and searched.
pub async fn show<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: &str,
    page: u32,
    limit: u32,
) -> Result<(), AppError> {
    let state = load_list(&order_list(client, page, limit)).await?;
    let order = state
        .items
        .iter()
        .find(|order| order.id.as_str() == id)
        .ok_or_else(|| AppError::NotFound(format!("order {id} on page {page}")))?;

    let status = order.status(Utc::now());
    field(out, "Order", &order.id)?;
    field(out, "Status", order_status_label(status))?;
    field(out, "Customer", order.customer_name())?;
    field(out, "Ship to", shipping_line(order))?;
    if let Some(user_id) = &order.user_id {
        field(out, "User ID", user_id)?;
    }
    if let Some(product) = &order.product {
        field(out, "Product", &product.product_name)?;
        field(out, "Price", format_price(product.price()))?;
    }

    writeln!(out)?;
    writeln!(out, "Timeline (estimated)")?;
    for (label, at) in order.timeline().reached(status) {
        field(out, label, format_datetime(at))?;
    }
    Ok(())
}
