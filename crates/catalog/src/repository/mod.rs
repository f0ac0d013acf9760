mod http;

pub use self::http::HttpCatalogRepository;
