use crate::{config::myconfig::Config, errors::RepositoryError};
use anyhow::{Context, Result};
use reqwest::{Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

/// Binary payload plus the content type the server declared for it.
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Thin wrapper over `reqwest` that pins the backend base URL and maps
/// transport results into [`RepositoryError`]. All repositories go
/// through this client; none of them build URLs by hand.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let base_url =
            Url::parse(&config.api_base_url).context("API_BASE_URL must be a valid URL")?;

        Ok(Self { client, base_url })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RepositoryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RepositoryError::Custom("API_BASE_URL cannot be a base".into()))?
            .extend(segments);
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, RepositoryError> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;

        Ok(response.json::<T>().await?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, RepositoryError> {
        let url = self.endpoint(segments)?;

        debug!("POST {url}");

        let response = self.client.post(url).json(body).send().await?;
        let response = Self::check_status(response).await?;

        Ok(response.json::<T>().await?)
    }

    pub async fn put_json<B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), RepositoryError> {
        let url = self.endpoint(segments)?;

        debug!("PUT {url}");

        let response = self.client.put(url).json(body).send().await?;
        Self::check_status(response).await?;

        Ok(())
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<(), RepositoryError> {
        let url = self.endpoint(segments)?;

        debug!("DELETE {url}");

        let response = self.client.delete(url).send().await?;
        Self::check_status(response).await?;

        Ok(())
    }

    pub async fn get_bytes(&self, segments: &[&str]) -> Result<BinaryResponse, RepositoryError> {
        let url = self.endpoint(segments)?;

        debug!("GET {url} (binary)");

        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response.bytes().await?.to_vec();

        Ok(BinaryResponse {
            content_type,
            bytes,
        })
    }

    async fn check_status(response: Response) -> Result<Response, RepositoryError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }

        let message = response.text().await.unwrap_or_default();

        Err(RepositoryError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
