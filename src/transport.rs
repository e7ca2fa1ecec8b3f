// HTTP transport used to talk to the PrestaShop webservice

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::config::{ClientConfig, ConfigError};
use crate::error::TransportError;

/// Status code and raw body of one GET request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Authenticated GET access to the shop.
///
/// Implementations carry their own credentials; callers only pass URLs.
/// Any status code is a successful call, only connectivity problems are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

/// `reqwest` backed transport using HTTP basic auth with the API key as user name.
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.api_key, Some(""))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        (**self).get(url).await
    }
}
