use anyhow::{Context, Result};
use evently_core::{Event, EventDraft, EventQueryEngine};
use owo_colors::OwoColorize;

use crate::client::{Client, Resource};
use crate::commands::require_known_categories;
use crate::render::{EventView, Render};

/// Fields collected by the add-event form.
pub struct NewEventArgs {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub start: String,
    pub end: String,
    pub categories: Vec<i64>,
    pub created_by: Option<i64>,
}

impl NewEventArgs {
    fn into_draft(self) -> EventDraft {
        let mut draft = EventDraft {
            title: self.title,
            description: self.description,
            image: self.image.unwrap_or_default(),
            start_time: self.start,
            end_time: self.end,
            created_by: self.created_by,
            ..Default::default()
        };

        for id in self.categories {
            draft.toggle_category(id, true);
        }

        draft
    }
}

pub async fn run(client: &Client, engine: &EventQueryEngine, args: NewEventArgs) -> Result<()> {
    let draft = args.into_draft();
    draft.validate()?;

    let categories = client
        .fetch_categories()
        .await
        .context("Failed to load categories")?;
    require_known_categories(&categories, &draft.category_ids)?;

    let created: Event = client
        .create(Resource::Events, &draft)
        .await
        .context("Failed to add event")?;

    tracing::info!(id = created.id, "Created event");
    println!("{}", "Event added successfully!".green());
    let names = engine.resolve_category_names(&created.category_ids, &categories);
    println!("{}", EventView::new(&created, names).render());

    Ok(())
}
