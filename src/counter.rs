// Counting the orders available in the shop

use tracing::{info, instrument};

use crate::error::ClientError;
use crate::resource::{fetch_resource, ORDERS_TAG};
use crate::session::Session;
use crate::transport::Transport;
use crate::xml::XmlValue;

/// Number of entries in the orders collection. Zero orders is an error.
#[instrument(skip(session), fields(api_url = session.api_url()))]
pub async fn count_orders<T: Transport>(session: &Session<T>) -> Result<u32, ClientError> {
    let url = session.url(ORDERS_TAG);
    let orders = fetch_resource(session.transport(), &url, ORDERS_TAG).await?;

    let count = match orders.get("order") {
        None | Some(XmlValue::Null) => 0,
        Some(XmlValue::List(entries)) => entries.len(),
        Some(_) => 1,
    };
    if count == 0 {
        return Err(ClientError::NoOrdersAvailable);
    }

    let count = u32::try_from(count)
        .map_err(|_| ClientError::malformed(ORDERS_TAG, format!("{} orders exceed the supported range", count)))?;
    info!(count, "Counted orders");
    Ok(count)
}
