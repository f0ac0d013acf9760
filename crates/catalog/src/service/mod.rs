mod store;

pub use self::store::{CatalogSnapshot, CatalogStore};
