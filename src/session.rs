// Connection validation and the authenticated session

use tracing::{info, instrument, warn};

use crate::error::ClientError;
use crate::transport::Transport;

/// Transport whose credentials were accepted by the shop.
///
/// Only [`validate`] creates one. It is never changed afterwards.
#[derive(Debug)]
pub struct Session<T> {
    transport: T,
    api_url: String,
}

impl<T: Transport> Session<T> {
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// URL of a resource below the API root, e.g. `orders/5`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }
}

/// Probes the API root once with the transport's credentials.
#[instrument(skip(transport))]
pub async fn validate<T: Transport>(transport: T, api_url: &str) -> Result<Session<T>, ClientError> {
    let response = transport.get(api_url).await?;

    match response.status {
        200 => {
            info!("Connected to the webservice");
            Ok(Session {
                transport,
                api_url: api_url.trim_end_matches('/').to_string(),
            })
        }
        401 => {
            warn!("API key rejected");
            Err(ClientError::InvalidCredentials)
        }
        503 => {
            warn!("Webservice disabled");
            Err(ClientError::ServiceUnavailable)
        }
        status => {
            warn!(status, "Unexpected status code from API root");
            Err(ClientError::unexpected_status(status, &response.body))
        }
    }
}
