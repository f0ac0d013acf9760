mod http;

pub use self::http::HttpCartRepository;
