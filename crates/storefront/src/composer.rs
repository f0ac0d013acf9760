use cart::service::CartStore;
use catalog::{
    domain::{PaginationState, ViewMode},
    service::{CatalogSnapshot, CatalogStore},
};
use enrichment::pipeline::ImageEnrichmentPipeline;
use shared::model::{CartLine, Product};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Cart total: Σ unit price × quantity. Recomputed from the lines on
/// every call, never cached across mutations.
pub fn cart_total(lines: &[CartLine]) -> i64 {
    lines
        .iter()
        .map(|line| line.price * i64::from(line.quantity))
        .sum()
}

/// 1-based display bounds of the current page, None when the catalog is
/// empty. Purely derived from pagination state.
pub fn page_bounds(pagination: &PaginationState) -> Option<(i64, i64)> {
    if pagination.total_items == 0 {
        return None;
    }

    let page_index = i64::from(pagination.page_index);
    let page_size = i64::from(pagination.page_size);
    let start = page_index * page_size + 1;
    if start > pagination.total_items {
        return None;
    }
    let end = ((page_index + 1) * page_size).min(pagination.total_items);

    Some((start, end))
}

/// The single renderable sequence the view layer consumes.
#[derive(Debug, Clone)]
pub struct ComposedList {
    pub items: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination_visible: bool,
    pub display_bounds: Option<(i64, i64)>,
    pub no_results: bool,
}

/// Enriched copy of one catalog collection, tagged with the view mode it
/// was computed for.
#[derive(Debug, Clone)]
struct EnrichedView {
    mode: ViewMode,
    products: Vec<Product>,
}

/// Reconciles the active view mode, the catalog's resource slots and the
/// enrichment pipeline's latest output into one renderable list. The
/// pipeline output is a decorated copy; the stores stay the source of
/// truth.
#[derive(Clone)]
pub struct ListComposer {
    cart: CartStore,
    catalog: CatalogStore,
    pipeline: ImageEnrichmentPipeline,
    enriched: Arc<Mutex<Option<EnrichedView>>>,
}

impl ListComposer {
    pub fn new(cart: CartStore, catalog: CatalogStore, pipeline: ImageEnrichmentPipeline) -> Self {
        Self {
            cart,
            catalog,
            pipeline,
            enriched: Arc::new(Mutex::new(None)),
        }
    }

    fn active_products(snapshot: &CatalogSnapshot) -> Vec<Product> {
        let resource = match &snapshot.view_mode {
            ViewMode::Paginated => &snapshot.page,
            ViewMode::CategoryFiltered(_) => &snapshot.category,
            ViewMode::Searched(_) => &snapshot.search,
        };
        resource.value().cloned().unwrap_or_default()
    }

    /// Runs the pipeline over the active collection and republishes the
    /// enriched copy. Best effort; the primary list renders regardless.
    pub async fn refresh_images(&self) {
        let snapshot = self.catalog.snapshot().await;
        let products = Self::active_products(&snapshot);

        if products.is_empty() {
            return;
        }

        let enriched = self.pipeline.enrich_products(&products).await;
        info!("enriched {} products for display", enriched.len());

        *self.enriched.lock().await = Some(EnrichedView {
            mode: snapshot.view_mode,
            products: enriched,
        });
    }

    /// Hydrates cart images and hands the mapping to the cart store,
    /// which prunes it on later mutations.
    pub async fn hydrate_cart_images(&self) {
        let snapshot = self.cart.snapshot().await;
        let lines = snapshot.lines.value().cloned().unwrap_or_default();

        if lines.is_empty() {
            return;
        }

        let images = self.pipeline.image_map(&lines).await;
        self.cart.apply_image_map(images).await;
    }

    pub async fn compose(&self) -> ComposedList {
        let snapshot = self.catalog.snapshot().await;

        let resource = match &snapshot.view_mode {
            ViewMode::Paginated => &snapshot.page,
            ViewMode::CategoryFiltered(_) => &snapshot.category,
            ViewMode::Searched(_) => &snapshot.search,
        };

        let raw = resource.value().cloned().unwrap_or_default();

        // use the enriched copy only when it was computed for exactly
        // this collection; anything else would show stale items
        let enriched = self.enriched.lock().await;
        let items = match enriched.as_ref() {
            Some(view) if view.mode == snapshot.view_mode && same_products(&view.products, &raw) => {
                view.products.clone()
            }
            _ => raw,
        };

        let pagination_visible = snapshot.view_mode.is_paginated();

        ComposedList {
            items,
            loading: resource.is_loading(),
            error: resource.error().map(str::to_string),
            pagination_visible,
            display_bounds: if pagination_visible {
                page_bounds(&snapshot.pagination)
            } else {
                None
            },
            no_results: matches!(snapshot.view_mode, ViewMode::Searched(_)) && snapshot.no_results,
        }
    }
}

fn same_products(enriched: &[Product], raw: &[Product]) -> bool {
    enriched.len() == raw.len()
        && enriched
            .iter()
            .zip(raw)
            .all(|(a, b)| a.id == b.id)
}
