use crate::model::product::Product;
use serde::{Deserialize, Serialize};

/// One product+quantity entry in a user's cart. `price` is the unit-price
/// snapshot taken by the backend at add time. The cart store keeps at most
/// one line per product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: i64,
    pub product: Product,
    pub quantity: i32,
    pub price: i64,
}
