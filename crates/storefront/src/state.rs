use crate::di::DependenciesInject;
use anyhow::{Context, Result};
use shared::config::{Config, HttpClient};
use std::fmt;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub config: Config,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config = Config::init().context("Failed to load configuration")?;

        let client = HttpClient::new(&config).context("Failed to initialize HTTP client")?;

        let di_container = DependenciesInject::new(client);

        Ok(Self {
            di_container,
            config,
        })
    }
}
