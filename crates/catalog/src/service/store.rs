use crate::{
    abstract_trait::DynCatalogRepository,
    domain::{PaginationState, ViewMode, requests::FindAllProducts},
};
use shared::{
    errors::ServiceError,
    model::Product,
    resource::{AsyncResource, ResourceSlot},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use validator::Validate;

#[derive(Debug, Default)]
struct CatalogState {
    page: ResourceSlot<Vec<Product>>,
    pagination: PaginationState,
    category: ResourceSlot<Vec<Product>>,
    search: ResourceSlot<Vec<Product>>,
    no_results: bool,
    view_mode: ViewMode,
}

/// Point-in-time copy of the catalog state for the view layer.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub page: AsyncResource<Vec<Product>>,
    pub pagination: PaginationState,
    pub category: AsyncResource<Vec<Product>>,
    pub search: AsyncResource<Vec<Product>>,
    pub no_results: bool,
    pub view_mode: ViewMode,
}

/// Local view of the product catalog: one paginated slot plus unpaged
/// category and search slots. Each slot discards completions of requests
/// that were superseded before their response arrived.
#[derive(Clone)]
pub struct CatalogStore {
    repository: DynCatalogRepository,
    state: Arc<Mutex<CatalogState>>,
}

impl CatalogStore {
    pub fn new(repository: DynCatalogRepository) -> Self {
        Self {
            repository,
            state: Arc::new(Mutex::new(CatalogState::default())),
        }
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.lock().await;
        CatalogSnapshot {
            page: state.page.state().clone(),
            pagination: state.pagination.clone(),
            category: state.category.state().clone(),
            search: state.search.state().clone(),
            no_results: state.no_results,
            view_mode: state.view_mode.clone(),
        }
    }

    /// Fetches one catalog page. Collection and pagination state are
    /// replaced together under one lock, and only if no newer page fetch
    /// was issued while this one was in flight.
    pub async fn fetch_page(&self, req: &FindAllProducts) -> Result<(), ServiceError> {
        req.validate()?;

        let token = {
            let mut state = self.state.lock().await;
            state.view_mode = ViewMode::Paginated;
            state.page.begin()
        };

        match self.repository.fetch_page(req).await {
            Ok(response) => {
                let mut state = self.state.lock().await;
                let total_items = response.total_items;
                if state.page.succeed(token, response.products) {
                    state.pagination = PaginationState {
                        page_index: req.page,
                        page_size: req.size,
                        total_items,
                        sort_by: req.sort_by.clone(),
                        sort_dir: req.sort_dir.clone(),
                    };
                    info!("loaded catalog page {} ({} items total)", req.page, total_items);
                }
            }
            Err(err) => {
                error!("failed to fetch catalog page {}: {err}", req.page);
                self.state.lock().await.page.fail(token, err.to_string());
            }
        }

        Ok(())
    }

    /// Replaces the unpaged category view and makes it the active one.
    pub async fn fetch_by_category(&self, category: &str) {
        let token = {
            let mut state = self.state.lock().await;
            state.view_mode = ViewMode::CategoryFiltered(category.to_string());
            state.category.begin()
        };

        match self.repository.fetch_by_category(category).await {
            Ok(products) => {
                let mut state = self.state.lock().await;
                if state.category.succeed(token, products) {
                    info!("loaded category view for {category:?}");
                }
            }
            Err(err) => {
                error!("failed to fetch category {category:?}: {err}");
                self.state
                    .lock()
                    .await
                    .category
                    .fail(token, err.to_string());
            }
        }
    }

    /// Free-text product lookup. An empty term clears the search view and
    /// returns to the paginated one without touching the network. Every
    /// non-empty keystroke issues its own call; stale responses are
    /// dropped by token.
    pub async fn search(&self, term: &str) {
        if term.is_empty() {
            let mut state = self.state.lock().await;
            state.search.reset();
            state.no_results = false;
            state.view_mode = ViewMode::Paginated;
            return;
        }

        let token = {
            let mut state = self.state.lock().await;
            state.view_mode = ViewMode::Searched(term.to_string());
            state.search.begin()
        };

        match self.repository.search(term).await {
            Ok(products) => {
                let mut state = self.state.lock().await;
                let empty = products.is_empty();
                if state.search.succeed(token, products) {
                    state.no_results = empty;
                    info!("search for {term:?} returned {}", if empty { "no results" } else { "results" });
                }
            }
            Err(err) => {
                error!("search for {term:?} failed: {err}");
                let mut state = self.state.lock().await;
                if state.search.fail(token, err.to_string()) {
                    state.no_results = false;
                }
            }
        }
    }
}
