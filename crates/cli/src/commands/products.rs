//! Product catalogue commands.

use std::io::Write;

use exhiibot_admin::actions::PendingAction;
use exhiibot_admin::api::{NewProduct, Product, ProductFilter, ProductUpdate};
use exhiibot_admin::display::{format_price, truncate_text};
use exhiibot_admin::error::ValidationError;
use exhiibot_admin::listing::ListQuery;
use exhiibot_admin::resources::{ProductList, ProductSource};
use exhiibot_admin::{ApiClient, AppError};
use exhiibot_core::{Price, ProductId};

use super::{load_list, run_action};
use crate::output::{footer, table};

pub async fn list<W: Write>(
    client: &ApiClient,
    out: &mut W,
    page: u32,
    limit: u32,
    search: Option<String>,
) -> Result<(), AppError> {
    let products = ProductList::with_query(ProductSource::new(client.clone()), ListQuery {
        page,
        limit,
        filter: ProductFilter { search },
    });
    let state = load_list(&products).await?;

    let rows: Vec<Vec<String>> = state
        .items
        .iter()
        .map(|product| {
            vec![
                product.id.to_string(),
                product.product_name.clone(),
                format_price(product.price()),
                truncate_text(&product.product_desc, 40),
            ]
        })
        .collect();

    table(out, &["ID", "Name", "Price", "Description"], &rows)?;
    footer(out, rows.len(), &state.pagination)?;
    Ok(())
}

pub async fn create<W: Write>(
    client: &ApiClient,
    out: &mut W,
    name: String,
    description: String,
    image: String,
    price: &str,
) -> Result<(), AppError> {
    let price = Price::parse(price)?;
    let product = client
        .create_product(&NewProduct {
            product_name: name,
            product_desc: description,
            product_img: image,
            product_price: price.amount,
        })
        .await?;

    write_summary(out, "Created", &product)?;
    Ok(())
}

/// Build an update from CLI flags, rejecting an empty one.
pub fn build_update(
    name: Option<String>,
    description: Option<String>,
    image: Option<String>,
    price: Option<String>,
) -> Result<ProductUpdate, AppError> {
    let price = price.as_deref().map(Price::parse).transpose()?;
    if name.is_none() && description.is_none() && image.is_none() && price.is_none() {
        return Err(
            ValidationError::Other("nothing to update; pass at least one field".to_string()).into(),
        );
    }
    Ok(ProductUpdate {
        product_name: name,
        product_desc: description,
        product_img: image,
        product_price: price.map(|price| price.amount),
    })
}

pub async fn update<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: &str,
    update: &ProductUpdate,
) -> Result<(), AppError> {
    let product = client.update_product(&ProductId::new(id), update).await?;
    write_summary(out, "Updated", &product)?;
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, verb: &str, product: &Product) -> std::io::Result<()> {
    writeln!(
        out,
        "{verb} product {} ({}, {}).",
        product.id,
        product.product_name,
        format_price(product.price())
    )
}

pub async fn delete<W: Write>(
    client: &ApiClient,
    out: &mut W,
    id: String,
    yes: bool,
) -> Result<(), AppError> {
    let action = PendingAction::DeleteProduct(ProductId::new(id));
    run_action(client, out, action, yes, "Product deleted.").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_update_rejects_empty() {
        assert!(matches!(
            build_update(None, None, None, None),
            Err(AppError::Validation(ValidationError::Other(_)))
        ));
    }

    #[test]
    fn test_build_update_parses_price() {
        let update = build_update(None, None, None, Some("₦1,500".to_string()));
        assert!(matches!(
            update,
            Ok(ProductUpdate { product_price: Some(p), product_name: None, .. }) if p.to_string() == "1500"
        ));

        assert!(matches!(
            build_update(None, None, None, Some("cheap".to_string())),
            Err(AppError::Validation(ValidationError::Price(_)))
        ));
    }
}
