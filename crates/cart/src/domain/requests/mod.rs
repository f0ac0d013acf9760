mod cart;

pub use self::cart::{AddToCartRequest, UpdateQuantityRequest};
