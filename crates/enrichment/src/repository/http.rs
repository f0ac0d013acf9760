use crate::abstract_trait::ImageRepositoryTrait;
use async_trait::async_trait;
use shared::{
    config::{BinaryResponse, HttpClient},
    errors::RepositoryError,
};

#[derive(Debug, Clone)]
pub struct HttpImageRepository {
    client: HttpClient,
}

impl HttpImageRepository {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageRepositoryTrait for HttpImageRepository {
    async fn fetch_image(&self, product_id: i32) -> Result<BinaryResponse, RepositoryError> {
        self.client
            .get_bytes(&["product", &product_id.to_string(), "image"])
            .await
    }
}
