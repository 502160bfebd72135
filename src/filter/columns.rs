//! Row-level filtering over the product table's columns.
//!
//! Each filterable column is tested on its own with [`QuickFilter`]; a row
//! is kept when any of them matches.

use chrono::{DateTime, Utc};

use super::quick::QuickFilter;
use crate::models::Product;
use crate::relative_time::format_relative_at;

/// Columns of the product table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    PreviousPrice,
    Price,
    Shop,
    LastSeen,
    FirstSeen,
    Notified,
    Link,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 8] = [
        Column::Name,
        Column::PreviousPrice,
        Column::Price,
        Column::Shop,
        Column::LastSeen,
        Column::FirstSeen,
        Column::Notified,
        Column::Link,
    ];

    /// Field name in the service payload.
    pub fn field(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::PreviousPrice => "previousPrice",
            Column::Price => "price",
            Column::Shop => "shop",
            Column::LastSeen => "lastSeen",
            Column::FirstSeen => "firstSeen",
            Column::Notified => "notified",
            Column::Link => "link",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::PreviousPrice => "Previous Price",
            Column::Price => "Price",
            Column::Shop => "Shop",
            Column::LastSeen => "Last Seen",
            Column::FirstSeen => "First Seen",
            Column::Notified => "Notified",
            Column::Link => "Link",
        }
    }

    /// The text a user sees in this column for `product`.
    ///
    /// Timestamps render relative to `now`; a missing previous price is empty.
    pub fn cell_text(&self, product: &Product, now: DateTime<Utc>) -> String {
        match self {
            Column::Name => product.name.clone(),
            Column::PreviousPrice => product
                .previous_price
                .map(|price| price.to_string())
                .unwrap_or_default(),
            Column::Price => product.price.to_string(),
            Column::Shop => product.shop.clone(),
            Column::LastSeen => format_relative_at(product.last_seen, now),
            Column::FirstSeen => format_relative_at(product.first_seen, now),
            Column::Notified => product.notified.to_string(),
            Column::Link => product.link.clone(),
        }
    }
}

/// Keep the products for which `query` matches at least one of `columns`.
///
/// Order is preserved. An empty query keeps everything.
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    columns: &[Column],
    now: DateTime<Utc>,
) -> Vec<&'a Product> {
    let Some(filter) = QuickFilter::compile(query) else {
        return products.iter().collect();
    };

    products
        .iter()
        .filter(|product| {
            columns
                .iter()
                .any(|column| filter.matches(&column.cell_text(product, now)))
        })
        .collect()
}
