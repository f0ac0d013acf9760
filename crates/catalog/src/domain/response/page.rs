use serde::{Deserialize, Serialize};
use shared::model::Product;

/// Page envelope returned by GET /products.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse {
    pub products: Vec<Product>,
    pub current_page: i32,
    pub total_pages: i32,
    pub total_items: i64,
    pub page_size: i32,
    pub has_next: bool,
    pub has_previous: bool,
}
