// Fetching single webservice resources

use std::fmt;
use tracing::{debug, instrument, warn};

use crate::error::ClientError;
use crate::transport::Transport;
use crate::xml::{decode_resource, XmlNode};

/// Root tag of the orders collection.
pub const ORDERS_TAG: &str = "orders";

/// Resources that make up one order, in fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Order,
    OrderState,
    Customer,
    Address,
    Country,
    State,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Order,
        ResourceKind::OrderState,
        ResourceKind::Customer,
        ResourceKind::Address,
        ResourceKind::Country,
        ResourceKind::State,
    ];

    /// XML root tag of the resource.
    pub fn root_tag(self) -> &'static str {
        match self {
            ResourceKind::Order => "order",
            ResourceKind::OrderState => "order_state",
            ResourceKind::Customer => "customer",
            ResourceKind::Address => "address",
            ResourceKind::Country => "country",
            ResourceKind::State => "state",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_tag())
    }
}

/// GETs `url` and decodes the fields under `root_tag`.
///
/// A 404 is not an error: the resource is absent and an empty mapping is returned.
#[instrument(skip(transport))]
pub async fn fetch_resource<T>(
    transport: &T,
    url: &str,
    root_tag: &str,
) -> Result<XmlNode, ClientError>
where
    T: Transport + ?Sized,
{
    let response = transport.get(url).await?;

    match response.status {
        200 => {
            let resource = decode_resource(&response.body, root_tag)?;
            debug!(fields = resource.len(), "Fetched resource");
            Ok(resource)
        }
        404 => {
            debug!("Resource not found, treating it as absent");
            Ok(XmlNode::new())
        }
        401 => {
            warn!("API key has no access to resource");
            Err(ClientError::ResourceForbidden(root_tag.to_string()))
        }
        status => {
            warn!(status, "Unexpected status code");
            Err(ClientError::unexpected_status(status, &response.body))
        }
    }
}
