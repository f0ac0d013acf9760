use crate::{
    abstract_trait::CatalogRepositoryTrait,
    domain::{requests::FindAllProducts, response::ProductPageResponse},
};
use async_trait::async_trait;
use shared::{config::HttpClient, errors::RepositoryError, model::Product};

#[derive(Debug, Clone)]
pub struct HttpCatalogRepository {
    client: HttpClient,
}

impl HttpCatalogRepository {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogRepositoryTrait for HttpCatalogRepository {
    async fn fetch_page(
        &self,
        req: &FindAllProducts,
    ) -> Result<ProductPageResponse, RepositoryError> {
        let query = [
            ("page", req.page.to_string()),
            ("size", req.size.to_string()),
            ("sortBy", req.sort_by.clone()),
            ("sortDir", req.sort_dir.clone()),
        ];

        self.client.get_json(&["products"], &query).await
    }

    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Product>, RepositoryError> {
        self.client
            .get_json(&["products", "category", category], &[])
            .await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Product>, RepositoryError> {
        self.client
            .get_json(&["products", "search"], &[("keyword", keyword.to_string())])
            .await
    }
}
