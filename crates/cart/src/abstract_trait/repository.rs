use crate::domain::requests::{AddToCartRequest, UpdateQuantityRequest};
use async_trait::async_trait;
use shared::{errors::RepositoryError, model::CartLine};
use std::sync::Arc;

pub type DynCartRepository = Arc<dyn CartRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CartRepositoryTrait {
    async fn fetch_cart(&self, user_id: i64) -> Result<Vec<CartLine>, RepositoryError>;
    async fn add_item(&self, req: &AddToCartRequest) -> Result<CartLine, RepositoryError>;
    async fn remove_item(&self, user_id: i64, product_id: i32) -> Result<(), RepositoryError>;
    async fn update_quantity(
        &self,
        user_id: i64,
        product_id: i32,
        req: &UpdateQuantityRequest,
    ) -> Result<(), RepositoryError>;
    async fn clear(&self, user_id: i64) -> Result<(), RepositoryError>;
}
