use anyhow::{Context, Result};
use evently_core::{Event, EventQueryEngine};

use crate::client::{Client, Resource};
use crate::render::EventView;

pub async fn run(client: &Client, engine: &EventQueryEngine, id: i64) -> Result<()> {
    let (event, catalog) = tokio::try_join!(
        client.fetch_one::<Event>(Resource::Events, id),
        client.load_catalog()
    )
    .with_context(|| format!("Failed to load event {id}"))?;

    let view = EventView::new(&event, catalog.category_names(engine, &event))
        .with_creator(catalog.creator_of(&event));

    println!("{}", view.render_detail());

    Ok(())
}
