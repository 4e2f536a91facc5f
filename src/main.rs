use anyhow::{Context, Result};
use log::info;
use recordbase::config::Config;
use recordbase::services::{BusinessService, ListRequest, ProductService};
use recordbase::{logger, product, Storage};

const SAMPLE_COLOURS: [&str; 3] = ["red", "blue", "green"];

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logger::init(&config.logging)?;

    let storage = Storage::connect(&config.database).await?;
    let service = ProductService::new(storage.repository());

    if !storage.has_data().await? {
        info!("Empty database, seeding sample products");
        for n in 1..=12 {
            let colour = SAMPLE_COLOURS[n % SAMPLE_COLOURS.len()];
            let mut item = product::Model::new(format!("SKU-{:03}", n), format!("Sample {:02}", n), colour, 100 * n as i64);
            service.persist_entity(&mut item).await?;
        }
    }

    let search_terms = std::env::args().nth(1).unwrap_or_default();
    let result = service
        .list_items(ListRequest::page(1, 5).searching(search_terms))
        .await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&result).context("Failed to render listing")?
    );

    Ok(())
}
