use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub page_size: i32,
}

impl Config {
    pub fn init() -> Result<Self> {
        let api_base_url =
            std::env::var("API_BASE_URL").context("Missing environment variable: API_BASE_URL")?;

        let http_timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a valid u64 integer")?,
            Err(_) => 30,
        };

        let page_size = match std::env::var("PAGE_SIZE") {
            Ok(value) => value
                .parse::<i32>()
                .context("PAGE_SIZE must be a valid i32 integer")?,
            Err(_) => 12,
        };

        Ok(Self {
            api_base_url,
            http_timeout_secs,
            page_size,
        })
    }
}
