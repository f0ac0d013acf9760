mod page;

pub use self::page::ProductPageResponse;
