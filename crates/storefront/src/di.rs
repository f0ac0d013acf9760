use crate::composer::ListComposer;
use cart::{repository::HttpCartRepository, service::CartStore};
use catalog::{repository::HttpCatalogRepository, service::CatalogStore};
use enrichment::{pipeline::ImageEnrichmentPipeline, repository::HttpImageRepository};
use shared::config::HttpClient;
use std::{fmt, sync::Arc};

/// Wires the HTTP repositories, stores, pipeline and composer together.
/// Constructed once by the application root and passed by reference;
/// there is no process-wide store.
#[derive(Clone)]
pub struct DependenciesInject {
    pub cart_store: CartStore,
    pub catalog_store: CatalogStore,
    pub image_pipeline: ImageEnrichmentPipeline,
    pub composer: ListComposer,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("cart_store", &"CartStore")
            .field("catalog_store", &"CatalogStore")
            .field("image_pipeline", &"ImageEnrichmentPipeline")
            .field("composer", &"ListComposer")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(client: HttpClient) -> Self {
        let cart_repo = Arc::new(HttpCartRepository::new(client.clone()));
        let catalog_repo = Arc::new(HttpCatalogRepository::new(client.clone()));
        let image_repo = Arc::new(HttpImageRepository::new(client));

        let cart_store = CartStore::new(cart_repo);
        let catalog_store = CatalogStore::new(catalog_repo);
        let image_pipeline = ImageEnrichmentPipeline::new(image_repo);

        let composer = ListComposer::new(
            cart_store.clone(),
            catalog_store.clone(),
            image_pipeline.clone(),
        );

        Self {
            cart_store,
            catalog_store,
            image_pipeline,
            composer,
        }
    }
}
