use crate::{
    abstract_trait::DynCartRepository,
    domain::requests::{AddToCartRequest, UpdateQuantityRequest},
};
use shared::{
    errors::ServiceError,
    model::CartLine,
    resource::{AsyncResource, ResourceSlot},
};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio::sync::Mutex;
use tracing::{error, info};
use validator::Validate;

/// Merges the line the backend returned from an add-to-cart call into the
/// local line list. An existing line for the same product gains the
/// returned quantity (the backend echoes the delta, not the aggregate);
/// otherwise the returned line is appended.
pub fn merge_returned_line(mut lines: Vec<CartLine>, returned: CartLine) -> Vec<CartLine> {
    match lines.iter_mut().find(|l| l.product.id == returned.product.id) {
        Some(existing) => existing.quantity += returned.quantity,
        None => lines.push(returned),
    }
    lines
}

#[derive(Debug, Default)]
struct CartState {
    lines: ResourceSlot<Vec<CartLine>>,
    total: i64,
    image_by_product: HashMap<i32, String>,
}

impl CartState {
    fn current_lines(&self) -> &[CartLine] {
        self.lines
            .state()
            .value()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Runs after every applied line-list change: recomputes the total
    /// and drops enriched images whose product left the cart.
    fn apply_lines_change(&mut self) {
        let total = self
            .current_lines()
            .iter()
            .map(|line| line.price * i64::from(line.quantity))
            .sum();
        self.total = total;

        let kept: HashSet<i32> = self
            .current_lines()
            .iter()
            .map(|line| line.product.id)
            .collect();
        self.image_by_product.retain(|id, _| kept.contains(id));
    }
}

/// Point-in-time copy of the cart state, safe to hand to the view layer.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub lines: AsyncResource<Vec<CartLine>>,
    pub total: i64,
    pub image_by_product: HashMap<i32, String>,
}

/// Authoritative local mirror of one user's cart. Every mutation is a
/// backend round trip; transport failures land in the slot's `Failed`
/// state, client-side validation failures return `Err` without touching
/// the state or the network.
#[derive(Clone)]
pub struct CartStore {
    repository: DynCartRepository,
    state: Arc<Mutex<CartState>>,
}

impl CartStore {
    pub fn new(repository: DynCartRepository) -> Self {
        Self {
            repository,
            state: Arc::new(Mutex::new(CartState::default())),
        }
    }

    pub async fn snapshot(&self) -> CartSnapshot {
        let state = self.state.lock().await;
        CartSnapshot {
            lines: state.lines.state().clone(),
            total: state.total,
            image_by_product: state.image_by_product.clone(),
        }
    }

    /// Replaces the whole line list with the server's view. An empty cart
    /// is a successful empty list, not an error.
    pub async fn load_cart(&self, user_id: i64) {
        let token = self.state.lock().await.lines.begin();

        match self.repository.fetch_cart(user_id).await {
            Ok(lines) => {
                let mut state = self.state.lock().await;
                if state.lines.succeed(token, lines) {
                    state.apply_lines_change();
                    info!("loaded cart for user {user_id}");
                }
            }
            Err(err) => {
                error!("failed to load cart for user {user_id}: {err}");
                self.state.lock().await.lines.fail(token, err.to_string());
            }
        }
    }

    pub async fn add_item(&self, req: &AddToCartRequest) -> Result<(), ServiceError> {
        req.validate()?;

        // snapshot the lines in the same lock that issues the token;
        // begin() transitions to Loading and drops the current value
        let (token, current) = {
            let mut state = self.state.lock().await;
            let current = state.lines.state().value().cloned().unwrap_or_default();
            (state.lines.begin(), current)
        };

        match self.repository.add_item(req).await {
            Ok(returned) => {
                let mut state = self.state.lock().await;
                let merged = merge_returned_line(current, returned);
                if state.lines.succeed(token, merged) {
                    state.apply_lines_change();
                    info!(
                        "added product {} (x{}) to cart of user {}",
                        req.product_id, req.quantity, req.user_id
                    );
                }
            }
            Err(err) => {
                error!("failed to add product {} to cart: {err}", req.product_id);
                self.state.lock().await.lines.fail(token, err.to_string());
            }
        }

        Ok(())
    }

    /// Removes the line for the given product id. Removing a product that
    /// is not in the local list is a no-op, never a failure.
    pub async fn remove_item(&self, user_id: i64, product_id: i32) {
        let (token, current) = {
            let mut state = self.state.lock().await;
            let current = state.lines.state().value().cloned().unwrap_or_default();
            (state.lines.begin(), current)
        };

        match self.repository.remove_item(user_id, product_id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                let remaining: Vec<CartLine> = current
                    .into_iter()
                    .filter(|line| line.product.id != product_id)
                    .collect();
                if state.lines.succeed(token, remaining) {
                    state.apply_lines_change();
                    info!("removed product {product_id} from cart of user {user_id}");
                }
            }
            Err(err) => {
                error!("failed to remove product {product_id} from cart: {err}");
                self.state.lock().await.lines.fail(token, err.to_string());
            }
        }
    }

    /// Sets the quantity of an existing line. Decreases are clamped to a
    /// floor of 1; increases past the product's stock are refused before
    /// any request is sent. A clamped quantity equal to the current one
    /// skips the round trip entirely.
    pub async fn set_quantity(
        &self,
        user_id: i64,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), ServiceError> {
        let (current_quantity, stock) = {
            let state = self.state.lock().await;
            let line = state
                .current_lines()
                .iter()
                .find(|line| line.product.id == product_id)
                .ok_or_else(|| {
                    ServiceError::Validation(vec![format!("Product {product_id} is not in the cart")])
                })?;
            (line.quantity, line.product.stock_quantity)
        };

        let quantity = quantity.max(1);

        if quantity > stock {
            return Err(ServiceError::Validation(vec![format!(
                "Cannot exceed available stock ({stock})"
            )]));
        }

        if quantity == current_quantity {
            return Ok(());
        }

        let req = UpdateQuantityRequest { quantity };
        req.validate()?;

        let (token, mut lines) = {
            let mut state = self.state.lock().await;
            let current = state.lines.state().value().cloned().unwrap_or_default();
            (state.lines.begin(), current)
        };

        match self
            .repository
            .update_quantity(user_id, product_id, &req)
            .await
        {
            Ok(()) => {
                let mut state = self.state.lock().await;
                if let Some(line) = lines.iter_mut().find(|line| line.product.id == product_id) {
                    line.quantity = quantity;
                }
                if state.lines.succeed(token, lines) {
                    state.apply_lines_change();
                    info!("set quantity of product {product_id} to {quantity}");
                }
            }
            Err(err) => {
                error!("failed to update quantity of product {product_id}: {err}");
                self.state.lock().await.lines.fail(token, err.to_string());
            }
        }

        Ok(())
    }

    /// Empties the cart on the backend and locally.
    pub async fn clear(&self, user_id: i64) {
        let token = self.state.lock().await.lines.begin();

        match self.repository.clear(user_id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                if state.lines.succeed(token, Vec::new()) {
                    state.apply_lines_change();
                    info!("cleared cart of user {user_id}");
                }
            }
            Err(err) => {
                error!("failed to clear cart of user {user_id}: {err}");
                self.state.lock().await.lines.fail(token, err.to_string());
            }
        }
    }

    /// Stores the enrichment pipeline's image mapping, keeping only
    /// entries for products still present in the line list.
    pub async fn apply_image_map(&self, images: HashMap<i32, String>) {
        let mut state = self.state.lock().await;
        let kept: HashSet<i32> = state
            .current_lines()
            .iter()
            .map(|line| line.product.id)
            .collect();
        state.image_by_product = images
            .into_iter()
            .filter(|(id, _)| kept.contains(id))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::CartRepositoryTrait;
    use async_trait::async_trait;
    use shared::{errors::RepositoryError, model::Product};
    use std::sync::Mutex as StdMutex;

    fn product(id: i32, price: i64, stock: i32) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            brand: "Acme".into(),
            description: "".into(),
            price,
            category: "Laptop".into(),
            stock_quantity: stock,
            release_date: None,
            available: true,
            display_image: None,
        }
    }

    fn line(id: i64, product_id: i32, price: i64, quantity: i32, stock: i32) -> CartLine {
        CartLine {
            id,
            product: product(product_id, price, stock),
            quantity,
            price,
        }
    }

    #[derive(Default)]
    struct MockCartRepository {
        cart: Vec<CartLine>,
        add_returns: Option<CartLine>,
        fail_with: Option<RepositoryError>,
        calls: StdMutex<Vec<String>>,
    }

    impl MockCartRepository {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) -> Result<(), RepositoryError> {
            self.calls.lock().unwrap().push(call.to_string());
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl CartRepositoryTrait for MockCartRepository {
        async fn fetch_cart(&self, _user_id: i64) -> Result<Vec<CartLine>, RepositoryError> {
            self.record("fetch_cart")?;
            Ok(self.cart.clone())
        }

        async fn add_item(&self, _req: &AddToCartRequest) -> Result<CartLine, RepositoryError> {
            self.record("add_item")?;
            Ok(self.add_returns.clone().expect("add_returns not set"))
        }

        async fn remove_item(
            &self,
            _user_id: i64,
            product_id: i32,
        ) -> Result<(), RepositoryError> {
            self.record(&format!("remove_item:{product_id}"))
        }

        async fn update_quantity(
            &self,
            _user_id: i64,
            product_id: i32,
            req: &UpdateQuantityRequest,
        ) -> Result<(), RepositoryError> {
            self.record(&format!("update_quantity:{product_id}:{}", req.quantity))
        }

        async fn clear(&self, _user_id: i64) -> Result<(), RepositoryError> {
            self.record("clear")
        }
    }

    fn store_with(repo: MockCartRepository) -> (CartStore, Arc<MockCartRepository>) {
        let repo = Arc::new(repo);
        (CartStore::new(repo.clone()), repo)
    }

    #[test]
    fn merge_appends_new_product() {
        let lines = vec![line(1, 10, 100, 2, 5)];
        let merged = merge_returned_line(lines, line(2, 20, 50, 1, 5));

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].product.id, 20);
        assert_eq!(merged[1].quantity, 1);
    }

    #[test]
    fn merge_adds_quantity_for_existing_product() {
        let lines = vec![line(1, 10, 100, 2, 9)];
        let merged = merge_returned_line(lines, line(1, 10, 100, 3, 9));

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity, 5);
    }

    #[tokio::test]
    async fn add_item_appends_line_for_new_product() {
        let (store, _repo) = store_with(MockCartRepository {
            add_returns: Some(line(7, 42, 150, 1, 10)),
            ..Default::default()
        });

        store.load_cart(1).await;
        store
            .add_item(&AddToCartRequest {
                user_id: 1,
                product_id: 42,
                quantity: 1,
            })
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        let lines = snapshot.lines.value().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product.id, 42);
        assert_eq!(snapshot.total, 150);
    }

    #[tokio::test]
    async fn add_item_preserves_existing_lines() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5), line(2, 20, 50, 1, 5)],
            add_returns: Some(line(3, 30, 75, 1, 8)),
            ..Default::default()
        });
        store.load_cart(1).await;

        store
            .add_item(&AddToCartRequest {
                user_id: 1,
                product_id: 30,
                quantity: 1,
            })
            .await
            .unwrap();

        let snapshot = store.snapshot().await;
        let lines = snapshot.lines.value().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].product.id, 10);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[1].product.id, 20);
        assert_eq!(snapshot.total, 200 + 50 + 75);
    }

    #[tokio::test]
    async fn remove_item_keeps_other_lines() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5), line(2, 20, 50, 1, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        store.remove_item(1, 10).await;

        let snapshot = store.snapshot().await;
        let lines = snapshot.lines.value().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product.id, 20);
        assert_eq!(snapshot.total, 50);
    }

    #[tokio::test]
    async fn set_quantity_leaves_other_lines_untouched() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5), line(2, 20, 50, 1, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        store.set_quantity(1, 10, 4).await.unwrap();

        let snapshot = store.snapshot().await;
        let lines = snapshot.lines.value().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 4);
        assert_eq!(lines[1].product.id, 20);
        assert_eq!(lines[1].quantity, 1);
        assert_eq!(snapshot.total, 400 + 50);
    }

    #[tokio::test]
    async fn add_item_rejects_invalid_quantity_without_network() {
        let (store, repo) = store_with(MockCartRepository::default());

        let result = store
            .add_item(&AddToCartRequest {
                user_id: 1,
                product_id: 42,
                quantity: 0,
            })
            .await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn total_is_sum_of_price_times_quantity() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5), line(2, 20, 50, 1, 5)],
            ..Default::default()
        });

        store.load_cart(1).await;

        assert_eq!(store.snapshot().await.total, 250);
    }

    #[tokio::test]
    async fn set_quantity_over_stock_issues_no_call() {
        let (store, repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        let result = store.set_quantity(1, 10, 9).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(repo.calls(), vec!["fetch_cart"]);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.lines.value().unwrap()[0].quantity, 2);
    }

    #[tokio::test]
    async fn set_quantity_clamps_decrease_to_one() {
        let (store, repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 3, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        store.set_quantity(1, 10, 0).await.unwrap();

        assert_eq!(repo.calls(), vec!["fetch_cart", "update_quantity:10:1"]);
        assert_eq!(store.snapshot().await.lines.value().unwrap()[0].quantity, 1);
    }

    #[tokio::test]
    async fn set_quantity_skips_round_trip_when_unchanged() {
        let (store, repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 1, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        // a decrease from 1 clamps back to 1, so nothing is sent
        store.set_quantity(1, 10, 0).await.unwrap();

        assert_eq!(repo.calls(), vec!["fetch_cart"]);
    }

    #[tokio::test]
    async fn remove_absent_product_is_a_noop() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        store.remove_item(1, 999).await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.lines.is_succeeded());
        assert_eq!(snapshot.lines.value().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_empties_lines_and_total() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;
        assert_eq!(store.snapshot().await.total, 200);

        store.clear(1).await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.lines.value().unwrap().is_empty());
        assert_eq!(snapshot.total, 0);
    }

    #[tokio::test]
    async fn transport_failure_lands_in_failed_state() {
        let (store, _repo) = store_with(MockCartRepository {
            fail_with: Some(RepositoryError::Network("connection refused".into())),
            ..Default::default()
        });

        store.load_cart(1).await;

        let snapshot = store.snapshot().await;
        assert!(snapshot.lines.is_failed());
        assert!(snapshot.lines.error().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn mutation_prunes_images_of_removed_products() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5), line(2, 20, 50, 1, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        store
            .apply_image_map(HashMap::from([
                (10, "data:image/png;base64,a".to_string()),
                (20, "data:image/png;base64,b".to_string()),
            ]))
            .await;

        store.remove_item(1, 20).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.image_by_product.len(), 1);
        assert!(snapshot.image_by_product.contains_key(&10));
    }

    #[tokio::test]
    async fn image_map_ignores_products_outside_the_cart() {
        let (store, _repo) = store_with(MockCartRepository {
            cart: vec![line(1, 10, 100, 2, 5)],
            ..Default::default()
        });
        store.load_cart(1).await;

        store
            .apply_image_map(HashMap::from([
                (10, "data:image/png;base64,a".to_string()),
                (99, "data:image/png;base64,zzz".to_string()),
            ]))
            .await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.image_by_product.len(), 1);
    }
}
