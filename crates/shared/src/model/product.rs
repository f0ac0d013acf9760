use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Catalog product as served by the backend. Immutable once fetched,
/// except for `display_image` which the enrichment pipeline attaches
/// locally and which never goes back over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub stock_quantity: i32,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    pub available: bool,
    #[serde(skip)]
    pub display_image: Option<String>,
}
