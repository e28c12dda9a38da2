use anyhow::{Context, Result};
use dialoguer::Confirm;
use evently_core::Event;
use owo_colors::OwoColorize;

use crate::client::{Client, Resource};

pub async fn run(client: &Client, id: i64, yes: bool) -> Result<()> {
    let event: Event = client
        .fetch_one(Resource::Events, id)
        .await
        .with_context(|| format!("Failed to load event {id}"))?;

    // Confirm unless --yes
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    client
        .delete(Resource::Events, id)
        .await
        .context("Failed to delete event")?;

    tracing::info!(id, "Deleted event");
    println!("{}", "Event deleted successfully!".green());

    Ok(())
}
