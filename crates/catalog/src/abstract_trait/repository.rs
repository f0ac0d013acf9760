use crate::domain::{requests::FindAllProducts, response::ProductPageResponse};
use async_trait::async_trait;
use shared::{errors::RepositoryError, model::Product};
use std::sync::Arc;

pub type DynCatalogRepository = Arc<dyn CatalogRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CatalogRepositoryTrait {
    async fn fetch_page(
        &self,
        req: &FindAllProducts,
    ) -> Result<ProductPageResponse, RepositoryError>;
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError>;
    async fn search(&self, keyword: &str) -> Result<Vec<Product>, RepositoryError>;
}
