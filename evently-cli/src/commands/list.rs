use anyhow::{Context, Result};
use evently_core::{EventQueryEngine, FilterCriteria};
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::{EventView, Render};

pub async fn run(
    client: &Client,
    engine: &EventQueryEngine,
    search: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let criteria = FilterCriteria::from_input(search.as_deref().unwrap_or(""), category.as_deref());

    if criteria.category_id.is_none() {
        if let Some(raw) = category.as_deref().filter(|c| !c.trim().is_empty()) {
            tracing::warn!(category = raw, "Category is not a numeric id, showing all categories");
        }
    }

    let (events, categories) = tokio::try_join!(client.fetch_events(), client.fetch_categories())
        .context("Failed to load events")?;

    let events = if criteria.is_unconstrained() {
        events
    } else {
        engine.filter_events(&events, &criteria)
    };

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let views: Vec<String> = events
        .iter()
        .map(|event| {
            let names = engine.resolve_category_names(&event.category_ids, &categories);
            EventView::new(event, names).render()
        })
        .collect();

    println!("{}", views.join("\n\n"));

    Ok(())
}
