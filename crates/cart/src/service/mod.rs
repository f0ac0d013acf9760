mod store;

pub use self::store::{CartSnapshot, CartStore, merge_returned_line};
