// Resolving the resources linked from one order

use tracing::{debug, instrument};

use crate::error::ClientError;
use crate::resource::{fetch_resource, ResourceKind};
use crate::session::Session;
use crate::transport::Transport;
use crate::xml::{Reference, XmlNode};

/// Raw fields of the six resources making up one order.
///
/// `state` is empty when the delivery address has no region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBundle {
    pub order: XmlNode,
    pub order_state: XmlNode,
    pub customer: XmlNode,
    pub address: XmlNode,
    pub country: XmlNode,
    pub state: XmlNode,
}

impl OrderBundle {
    pub fn resource(&self, kind: ResourceKind) -> &XmlNode {
        match kind {
            ResourceKind::Order => &self.order,
            ResourceKind::OrderState => &self.order_state,
            ResourceKind::Customer => &self.customer,
            ResourceKind::Address => &self.address,
            ResourceKind::Country => &self.country,
            ResourceKind::State => &self.state,
        }
    }
}

/// Link stored in `field` of `parent`, which must be present.
fn required_link<'a>(parent: &'a XmlNode, parent_kind: ResourceKind, field: &str) -> Result<&'a str, ClientError> {
    match parent.reference(field) {
        Some(Reference::Link(url)) => Ok(url),
        Some(Reference::Unlinked(value)) => Err(ClientError::malformed(
            parent_kind.root_tag(),
            format!("field {} has no link (value {:?})", field, value),
        )),
        None => Err(ClientError::malformed(
            parent_kind.root_tag(),
            format!("missing reference field {}", field),
        )),
    }
}

async fn fetch_kind<T: Transport>(
    session: &Session<T>,
    url: &str,
    kind: ResourceKind,
) -> Result<XmlNode, ClientError> {
    fetch_resource(session.transport(), url, kind.root_tag()).await
}

/// Fetches order `number` and every resource it links to, one after another.
#[instrument(skip(session))]
pub async fn resolve<T: Transport>(session: &Session<T>, number: u32) -> Result<OrderBundle, ClientError> {
    let order_url = session.url(&format!("orders/{}", number));
    let order = fetch_kind(session, &order_url, ResourceKind::Order).await?;
    if order.is_empty() {
        return Err(ClientError::malformed(
            ResourceKind::Order.root_tag(),
            format!("order {} not found", number),
        ));
    }

    let order_state = fetch_kind(
        session,
        required_link(&order, ResourceKind::Order, "current_state")?,
        ResourceKind::OrderState,
    )
    .await?;
    let customer = fetch_kind(
        session,
        required_link(&order, ResourceKind::Order, "id_customer")?,
        ResourceKind::Customer,
    )
    .await?;
    let address = fetch_kind(
        session,
        required_link(&order, ResourceKind::Order, "id_address_delivery")?,
        ResourceKind::Address,
    )
    .await?;
    let country = fetch_kind(
        session,
        required_link(&address, ResourceKind::Address, "id_country")?,
        ResourceKind::Country,
    )
    .await?;

    let state = match address.reference("id_state") {
        Some(Reference::Link(url)) => fetch_kind(session, url, ResourceKind::State).await?,
        Some(Reference::Unlinked(value)) => {
            debug!(value, "Address has no region, skipping state");
            XmlNode::new()
        }
        None => {
            return Err(ClientError::malformed(
                ResourceKind::Address.root_tag(),
                "missing reference field id_state",
            ))
        }
    };

    Ok(OrderBundle {
        order,
        order_state,
        customer,
        address,
        country,
        state,
    })
}
