// PrestaShop webservice client assembling flat order records

pub mod client;
pub mod config;
pub mod counter;
pub mod error;
pub mod mapper;
pub mod order;
pub mod resource;
pub mod session;
pub mod transport;
pub mod walker;
pub mod xml;

#[cfg(test)]
mod mock_shop;

// Re-export key types for convenience
pub use client::{ConnectError, PrestaShopOrderClient};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, TransportError};
pub use order::{Order, OrderBuilder};
pub use resource::ResourceKind;
pub use transport::{HttpTransport, RawResponse, Transport};
pub use xml::{Reference, XmlNode, XmlValue};
