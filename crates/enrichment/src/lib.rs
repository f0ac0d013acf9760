pub mod abstract_trait;
pub mod pipeline;
pub mod placeholder;
pub mod repository;
