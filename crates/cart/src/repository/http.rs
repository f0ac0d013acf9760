use crate::{
    abstract_trait::CartRepositoryTrait,
    domain::requests::{AddToCartRequest, UpdateQuantityRequest},
};
use async_trait::async_trait;
use shared::{config::HttpClient, errors::RepositoryError, model::CartLine};

#[derive(Debug, Clone)]
pub struct HttpCartRepository {
    client: HttpClient,
}

impl HttpCartRepository {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartRepositoryTrait for HttpCartRepository {
    async fn fetch_cart(&self, user_id: i64) -> Result<Vec<CartLine>, RepositoryError> {
        self.client
            .get_json(&["cart", &user_id.to_string()], &[])
            .await
    }

    async fn add_item(&self, req: &AddToCartRequest) -> Result<CartLine, RepositoryError> {
        self.client.post_json(&["cart", "add"], req).await
    }

    async fn remove_item(&self, user_id: i64, product_id: i32) -> Result<(), RepositoryError> {
        self.client
            .delete(&[
                "cart",
                &user_id.to_string(),
                "product",
                &product_id.to_string(),
            ])
            .await
    }

    async fn update_quantity(
        &self,
        user_id: i64,
        product_id: i32,
        req: &UpdateQuantityRequest,
    ) -> Result<(), RepositoryError> {
        self.client
            .put_json(
                &[
                    "cart",
                    &user_id.to_string(),
                    "product",
                    &product_id.to_string(),
                ],
                req,
            )
            .await
    }

    async fn clear(&self, user_id: i64) -> Result<(), RepositoryError> {
        self.client.delete(&["cart", &user_id.to_string()]).await
    }
}
