// Flat order record and its assembly from resource parts

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::mapper::{map_fields, OrderPart};
use crate::resource::ResourceKind;
use crate::walker::OrderBundle;

/// One order with its status, customer and delivery address flattened.
///
/// Only `company_name` and `state` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub total_paid: f64,
    pub reference: String,
    pub order_state: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub post_code: String,
    pub country: String,
    pub state: Option<String>,
}

/// Collects [`OrderPart`]s. A part applied later replaces the fields of an earlier one.
#[derive(Debug, Default)]
pub struct OrderBuilder {
    id: Option<u32>,
    total_paid: Option<f64>,
    reference: Option<String>,
    order_state: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    company_name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    post_code: Option<String>,
    country: Option<String>,
    state: Option<String>,
}

fn require<V>(value: Option<V>, field: &str) -> Result<V, ClientError> {
    value.ok_or_else(|| ClientError::malformed("order", format!("missing mandatory field {}", field)))
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(mut self, part: OrderPart) -> Self {
        match part {
            OrderPart::Order {
                id,
                total_paid,
                reference,
            } => {
                self.id = Some(id);
                self.total_paid = Some(total_paid);
                self.reference = Some(reference);
            }
            OrderPart::OrderState { order_state } => self.order_state = Some(order_state),
            OrderPart::Customer { email } => self.email = Some(email),
            OrderPart::Address {
                first_name,
                last_name,
                company_name,
                phone,
                address,
                city,
                post_code,
            } => {
                self.first_name = Some(first_name);
                self.last_name = Some(last_name);
                self.company_name = company_name;
                self.phone = Some(phone);
                self.address = Some(address);
                self.city = Some(city);
                self.post_code = Some(post_code);
            }
            OrderPart::Country { country } => self.country = Some(country),
            OrderPart::State { state } => self.state = state,
        }
        self
    }

    /// Fails with `MalformedData` naming the first mandatory field never set.
    pub fn build(self) -> Result<Order, ClientError> {
        Ok(Order {
            id: require(self.id, "id")?,
            total_paid: require(self.total_paid, "total_paid")?,
            reference: require(self.reference, "reference")?,
            order_state: require(self.order_state, "order_state")?,
            email: require(self.email, "email")?,
            first_name: require(self.first_name, "first_name")?,
            last_name: require(self.last_name, "last_name")?,
            company_name: self.company_name,
            phone: require(self.phone, "phone")?,
            address: require(self.address, "address")?,
            city: require(self.city, "city")?,
            post_code: require(self.post_code, "post_code")?,
            country: require(self.country, "country")?,
            state: self.state,
        })
    }
}

/// Maps every resource of the bundle and merges the parts into one [`Order`].
pub fn assemble(bundle: &OrderBundle, language_id: Option<&str>) -> Result<Order, ClientError> {
    ResourceKind::ALL
        .iter()
        .try_fold(OrderBuilder::new(), |builder, &kind| {
            map_fields(kind, bundle.resource(kind), language_id).map(|part| builder.apply(part))
        })?
        .build()
}
