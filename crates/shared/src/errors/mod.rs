mod repository;
mod service;

pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
