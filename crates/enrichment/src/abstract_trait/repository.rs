use async_trait::async_trait;
use shared::{config::BinaryResponse, errors::RepositoryError};
use std::sync::Arc;

pub type DynImageRepository = Arc<dyn ImageRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ImageRepositoryTrait {
    async fn fetch_image(&self, product_id: i32) -> Result<BinaryResponse, RepositoryError>;
}
