// Public client: connection, order counting and order retrieval

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{info, instrument};

use crate::config::{ClientConfig, ConfigError};
use crate::counter::count_orders;
use crate::error::ClientError;
use crate::order::{assemble, Order};
use crate::session::{validate, Session};
use crate::transport::{HttpTransport, Transport};
use crate::walker::resolve;

/// Errors raised while creating a client.
#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Client for the orders of one PrestaShop shop.
///
/// Creating a client checks the API key and counts the orders. Order numbers
/// `1..=order_count()` can then be fetched.
#[derive(Debug)]
pub struct PrestaShopOrderClient<T: Transport = HttpTransport> {
    session: Session<T>,
    order_count: u32,
    language_id: Option<String>,
}

impl PrestaShopOrderClient<HttpTransport> {
    /// Connects over HTTPS using the API key from `config`.
    pub async fn connect(config: ClientConfig) -> Result<Self, ConnectError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport).await?)
    }
}

impl<T: Transport> PrestaShopOrderClient<T> {
    /// Same as [`connect`](PrestaShopOrderClient::connect) over a caller supplied transport.
    #[instrument(skip(transport))]
    pub async fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ClientError> {
        let session = validate(transport, &config.api_url()).await?;
        let order_count = count_orders(&session).await?;
        info!(order_count, "Client ready");

        Ok(Self {
            session,
            order_count,
            language_id: config.language_id,
        })
    }

    /// Number of orders counted when the client was created or last refreshed.
    pub fn order_count(&self) -> u32 {
        self.order_count
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    /// Counts the orders again and uses the result as the new upper bound.
    pub async fn refresh_order_count(&mut self) -> Result<u32, ClientError> {
        self.order_count = count_orders(&self.session).await?;
        Ok(self.order_count)
    }

    /// Fetches and assembles order `number`.
    ///
    /// Numbers outside `1..=order_count()` fail with `InvalidOrderNumber` without any request.
    #[instrument(skip(self))]
    pub async fn get_order(&self, number: u32) -> Result<Order, ClientError> {
        if number < 1 || number > self.order_count {
            return Err(ClientError::InvalidOrderNumber {
                number,
                max: self.order_count,
            });
        }

        let bundle = resolve(&self.session, number).await?;
        let order = assemble(&bundle, self.language_id.as_deref())?;
        if order.id != number {
            return Err(ClientError::malformed(
                "order",
                format!("requested order {} but received order {}", number, order.id),
            ));
        }
        Ok(order)
    }

    /// All orders in ascending order number, fetched one after another.
    pub async fn get_all_orders(&self) -> Result<Vec<Order>, ClientError> {
        let mut orders = Vec::with_capacity(self.order_count as usize);
        for number in 1..=self.order_count {
            orders.push(self.get_order(number).await?);
        }
        Ok(orders)
    }

    /// All orders in ascending order number with up to `limit` orders resolved at once.
    pub async fn get_all_orders_buffered(&self, limit: usize) -> Result<Vec<Order>, ClientError> {
        stream::iter(1..=self.order_count)
            .map(|number| self.get_order(number))
            .buffered(limit.max(1))
            .try_collect()
            .await
    }
}
