mod cart;
mod product;

pub use self::cart::CartLine;
pub use self::product::Product;
