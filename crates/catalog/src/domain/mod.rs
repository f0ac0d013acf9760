mod pagination;
mod view;
pub mod requests;
pub mod response;

pub use self::pagination::PaginationState;
pub use self::view::ViewMode;
