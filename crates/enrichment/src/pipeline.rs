use crate::{
    abstract_trait::DynImageRepository,
    placeholder::{image_data_uri, placeholder_data_uri},
};
use futures::future::join_all;
use shared::model::{CartLine, Product};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Best-effort image hydration. All fetches for a collection are issued
/// concurrently and the enriched copy is published only once every one of
/// them has settled; a failed fetch settles as a synthesized placeholder,
/// so the pipeline never fails and never publishes partial results. The
/// stores' canonical collections are never touched, only copies.
#[derive(Clone)]
pub struct ImageEnrichmentPipeline {
    repository: DynImageRepository,
}

impl ImageEnrichmentPipeline {
    pub fn new(repository: DynImageRepository) -> Self {
        Self { repository }
    }

    async fn resolve_image(&self, product_id: i32, product_name: &str) -> String {
        match self.repository.fetch_image(product_id).await {
            Ok(image) => image_data_uri(&image.content_type, &image.bytes),
            Err(err) => {
                warn!("image fetch for product {product_id} failed, using placeholder: {err}");
                placeholder_data_uri(product_name)
            }
        }
    }

    /// Returns a copy of the collection with `display_image` attached to
    /// every product, real or placeholder.
    pub async fn enrich_products(&self, products: &[Product]) -> Vec<Product> {
        let fetches = products
            .iter()
            .map(|product| self.resolve_image(product.id, &product.name));

        let images = join_all(fetches).await;

        products
            .iter()
            .cloned()
            .zip(images)
            .map(|(mut product, uri)| {
                product.display_image = Some(uri);
                product
            })
            .collect()
    }

    /// Image mapping for a cart: one fetch per distinct product id.
    pub async fn image_map(&self, lines: &[CartLine]) -> HashMap<i32, String> {
        let mut seen = HashSet::new();
        let distinct: Vec<(i32, String)> = lines
            .iter()
            .filter(|line| seen.insert(line.product.id))
            .map(|line| (line.product.id, line.product.name.clone()))
            .collect();

        let fetches = distinct.iter().map(|(id, name)| async move {
            (*id, self.resolve_image(*id, name).await)
        });

        join_all(fetches).await.into_iter().collect()
    }
}
