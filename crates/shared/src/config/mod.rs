mod http;
mod myconfig;

pub use self::http::{BinaryResponse, HttpClient};
pub use self::myconfig::Config;
