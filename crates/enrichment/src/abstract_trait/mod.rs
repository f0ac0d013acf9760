mod repository;

pub use self::repository::{DynImageRepository, ImageRepositoryTrait};
