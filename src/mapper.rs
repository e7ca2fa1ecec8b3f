// Per-resource field extraction and normalization

use crate::error::ClientError;
use crate::resource::ResourceKind;
use crate::xml::{XmlNode, XmlValue};

/// Normalized fields contributed by one resource to an order.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderPart {
    Order {
        id: u32,
        total_paid: f64,
        reference: String,
    },
    OrderState {
        order_state: String,
    },
    Customer {
        email: String,
    },
    Address {
        first_name: String,
        last_name: String,
        company_name: Option<String>,
        phone: String,
        address: String,
        city: String,
        post_code: String,
    },
    Country {
        country: String,
    },
    State {
        state: Option<String>,
    },
}

/// Field access that reports which resource a missing or malformed field belongs to.
struct Fields<'a> {
    kind: ResourceKind,
    raw: &'a XmlNode,
}

impl<'a> Fields<'a> {
    fn required(&self, key: &str) -> Result<String, ClientError> {
        self.raw
            .text(key)
            .map(str::to_string)
            .ok_or_else(|| self.malformed(format!("missing field {}", key)))
    }

    fn optional(&self, key: &str) -> Result<Option<String>, ClientError> {
        match self.raw.get(key) {
            None | Some(XmlValue::Null) => Ok(None),
            Some(value) => value
                .as_text()
                .map(|text| Some(text.to_string()))
                .ok_or_else(|| self.malformed(format!("field {} is not text", key))),
        }
    }

    fn parsed<N: std::str::FromStr>(&self, key: &str) -> Result<N, ClientError> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .map_err(|_| self.malformed(format!("field {} is not a number: {:?}", key, raw)))
    }

    /// Text of `key.language`, picking the entry with the wanted language id if there are several.
    fn language_text(&self, key: &str, language_id: Option<&str>) -> Result<String, ClientError> {
        let entries = self
            .raw
            .get(key)
            .and_then(XmlValue::as_node)
            .and_then(|node| node.get("language"))
            .map(XmlValue::entries)
            .unwrap_or_default();

        let wanted = language_id.and_then(|id| {
            entries.iter().copied().find(|entry| {
                entry
                    .as_node()
                    .and_then(|node| node.text("@id"))
                    .is_some_and(|entry_id| entry_id == id)
            })
        });

        wanted
            .or_else(|| entries.first().copied())
            .and_then(XmlValue::as_text)
            .map(str::to_string)
            .ok_or_else(|| self.malformed(format!("missing display text in {}.language", key)))
    }

    fn malformed(&self, reason: String) -> ClientError {
        ClientError::malformed(self.kind.root_tag(), reason)
    }
}

/// Maps the raw fields of one resource to its part of the order.
///
/// `language_id` selects the display language of translated names. Without it, the
/// first language present is used.
pub fn map_fields(
    kind: ResourceKind,
    raw: &XmlNode,
    language_id: Option<&str>,
) -> Result<OrderPart, ClientError> {
    let fields = Fields { kind, raw };

    let part = match kind {
        ResourceKind::Order => OrderPart::Order {
            id: fields.parsed("id")?,
            total_paid: fields.parsed("total_paid")?,
            reference: fields.required("reference")?,
        },
        ResourceKind::OrderState => OrderPart::OrderState {
            order_state: fields.language_text("name", language_id)?,
        },
        ResourceKind::Customer => OrderPart::Customer {
            email: fields.required("email")?,
        },
        ResourceKind::Address => {
            let mut address = fields.required("address1")?;
            if let Some(second_line) = fields.optional("address2")? {
                address.push(' ');
                address.push_str(&second_line);
            }
            OrderPart::Address {
                first_name: fields.required("firstname")?,
                last_name: fields.required("lastname")?,
                company_name: fields.optional("company")?,
                phone: fields.required("phone")?,
                address,
                city: fields.required("city")?,
                post_code: fields.required("postcode")?,
            }
        }
        ResourceKind::Country => OrderPart::Country {
            country: fields.language_text("name", language_id)?,
        },
        ResourceKind::State if raw.is_empty() => OrderPart::State { state: None },
        // Region names are not translated
        ResourceKind::State => OrderPart::State {
            state: Some(fields.required("name")?),
        },
    };
    Ok(part)
}
