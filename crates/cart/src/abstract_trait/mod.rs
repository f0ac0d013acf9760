mod repository;

pub use self::repository::{CartRepositoryTrait, DynCartRepository};
