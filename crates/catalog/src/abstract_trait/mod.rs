mod repository;

pub use self::repository::{CatalogRepositoryTrait, DynCatalogRepository};
