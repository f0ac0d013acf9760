use anyhow::{Context, Result};
use catalog::domain::requests::FindAllProducts;
use shared::utils::init_logger;
use storefront::state::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    init_logger("storefront");

    let state = AppState::new().context("Failed to setup application")?;

    info!("fetching first catalog page");

    let catalog = &state.di_container.catalog_store;
    let composer = &state.di_container.composer;

    let req = FindAllProducts {
        size: state.config.page_size,
        ..Default::default()
    };
    catalog.fetch_page(&req).await?;

    composer.refresh_images().await;

    let list = composer.compose().await;
    match list.error {
        Some(message) => error!("catalog fetch failed: {message}"),
        None => match list.display_bounds {
            Some((start, end)) => {
                info!("showing products {start}-{end} ({} on this page)", list.items.len())
            }
            None => info!("catalog is empty"),
        },
    }

    Ok(())
}
