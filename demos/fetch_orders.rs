// Prints orders of a shop as JSON.
//
//   PRESTASHOP_HOST=myshop.com PRESTASHOP_API_KEY=... cargo run --example fetch_orders [order number]

use anyhow::{Context, Result};
use prestashop_orders_client::{ClientConfig, PrestaShopOrderClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().context("Failed to read shop configuration")?;
    let client = PrestaShopOrderClient::connect(config)
        .await
        .context("Failed to connect to the shop")?;

    let output = match std::env::args().nth(1) {
        Some(number) => {
            let number: u32 = number
                .parse()
                .with_context(|| format!("Invalid order number {:?}", number))?;
            let order = client.get_order(number).await?;
            serde_json::to_string_pretty(&order)?
        }
        None => {
            let orders = client.get_all_orders().await?;
            serde_json::to_string_pretty(&orders)?
        }
    };

    println!("{}", output);
    Ok(())
}
