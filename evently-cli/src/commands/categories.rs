use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::Render;

pub async fn run(client: &Client) -> Result<()> {
    let categories = client
        .fetch_categories()
        .await
        .context("Failed to load categories")?;

    if categories.is_empty() {
        println!("{}", "No categories found".dimmed());
        return Ok(());
    }

    for category in &categories {
        println!("{}", category.render());
    }

    Ok(())
}
