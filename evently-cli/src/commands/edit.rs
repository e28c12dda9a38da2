use anyhow::{Context, Result};
use evently_core::{Event, EventDraft, EventQueryEngine};
use owo_colors::OwoColorize;

use crate::client::{Client, Resource};
use crate::commands::require_known_categories;
use crate::render::{EventView, Render};

/// Changes requested for an existing event. `None` leaves a field as is.
#[derive(Default)]
pub struct EditEventArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub add_categories: Vec<i64>,
    pub remove_categories: Vec<i64>,
}

impl EditEventArgs {
    fn apply(self, draft: &mut EventDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(image) = self.image {
            draft.image = image;
        }
        if let Some(start) = self.start {
            draft.start_time = start;
        }
        if let Some(end) = self.end {
            draft.end_time = end;
        }
        for id in self.add_categories {
            draft.toggle_category(id, true);
        }
        for id in self.remove_categories {
            draft.toggle_category(id, false);
        }
    }
}

pub async fn run(
    client: &Client,
    engine: &EventQueryEngine,
    id: i64,
    args: EditEventArgs,
) -> Result<()> {
    let (event, categories) = tokio::try_join!(
        client.fetch_one::<Event>(Resource::Events, id),
        client.fetch_categories()
    )
    .with_context(|| format!("Failed to load event {id}"))?;

    let mut draft = EventDraft::from_event(&event);
    args.apply(&mut draft);
    draft.validate()?;
    require_known_categories(&categories, &draft.category_ids)?;

    let saved: Event = client
        .replace(Resource::Events, id, &draft)
        .await
        .context("Failed to update event")?;

    let updated = saved_or_merged(&event, &draft, saved);

    tracing::info!(id, "Updated event");
    println!("{}", "Event updated successfully!".green());
    let names = engine.resolve_category_names(&updated.category_ids, &categories);
    println!("{}", EventView::new(&updated, names).render());

    Ok(())
}

/// The record to show after a save. Some backends echo only part of the
/// record; unless the echo carries the event's id, the draft is merged onto
/// the original instead.
fn saved_or_merged(event: &Event, draft: &EventDraft, saved: Event) -> Event {
    if saved.id == event.id {
        saved
    } else {
        tracing::debug!(id = event.id, echoed = saved.id, "Backend echoed a different record");
        draft.apply_to(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock_client;
    use httpmock::Method::{GET, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    fn event() -> Event {
        Event {
            id: 3,
            title: "Jazz Night".to_string(),
            description: "Live music".to_string(),
            start_time: "2024-03-15T19:00".to_string(),
            end_time: "2024-03-15T22:00".to_string(),
            category_ids: vec![1],
            created_by: Some(4),
            ..Default::default()
        }
    }

    async fn serve_event(server: &MockServer) {
        server.mock_async(|when, then| {
            when.method(GET).path("/events/3");
            then.status(200).json_body(json!({
                "id": 3,
                "title": "Jazz Night",
                "description": "Live music",
                "startTime": "2024-03-15T19:00",
                "endTime": "2024-03-15T22:00",
                "categoryIds": [1]
            }));
        }).await;
        server.mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(200).json_body(json!([
                {"id": 1, "name": "music"},
                {"id": 2, "name": "food"}
            ]));
        }).await;
    }

    #[test]
    fn test_saved_record_is_kept_when_ids_match() {
        let event = event();
        let draft = EventDraft::from_event(&event);
        let saved = Event {
            id: 3,
            title: "From server".to_string(),
            ..Default::default()
        };

        assert_eq!(saved_or_merged(&event, &draft, saved.clone()), saved);
    }

    #[test]
    fn test_partial_echo_falls_back_to_merged_draft() {
        let event = event();
        let mut draft = EventDraft::from_event(&event);
        draft.title = "Jazz Brunch".to_string();
        draft.created_by = None;

        // Echo without an id, and an echo of some other record
        let echoes = [
            Event {
                title: "partial".to_string(),
                ..Default::default()
            },
            Event {
                id: 99,
                ..Default::default()
            },
        ];

        for saved in echoes {
            let updated = saved_or_merged(&event, &draft, saved);

            assert_eq!(updated.id, 3);
            assert_eq!(updated.title, "Jazz Brunch");
            assert_eq!(updated.description, "Live music");
            assert_eq!(updated.category_ids, vec![1]);
            assert_eq!(updated.created_by, Some(4));
        }
    }

    #[tokio::test]
    async fn test_edit_puts_merged_draft() {
        let server = MockServer::start_async().await;
        serve_event(&server).await;
        let put = server.mock_async(|when, then| {
            when.method(PUT).path("/events/3").json_body(json!({
                "title": "Jazz Brunch",
                "description": "Live music",
                "image": "",
                "startTime": "2024-03-15T19:00",
                "endTime": "2024-03-15T22:00",
                "categoryIds": [1, 2]
            }));
            // Partial echo, shown from the merged draft
            then.status(200).json_body(json!({"title": "Jazz Brunch"}));
        }).await;

        let args = EditEventArgs {
            title: Some("Jazz Brunch".to_string()),
            add_categories: vec![2],
            ..Default::default()
        };
        let result = run(&mock_client(&server), &EventQueryEngine::default(), 3, args).await;

        assert!(result.is_ok(), "{result:?}");
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_edit_rejects_unknown_category() {
        let server = MockServer::start_async().await;
        serve_event(&server).await;
        let put = server.mock_async(|when, then| {
            when.method(PUT).path("/events/3");
            then.status(200).json_body(json!({"id": 3}));
        }).await;

        let args = EditEventArgs {
            add_categories: vec![8],
            ..Default::default()
        };
        let err = run(&mock_client(&server), &EventQueryEngine::default(), 3, args)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Unknown category id(s): 8"));
        assert_eq!(put.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_edit_missing_event() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/events/3");
            then.status(404);
        }).await;
        server.mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(200).json_body(json!([]));
        }).await;

        let err = run(
            &mock_client(&server),
            &EventQueryEngine::default(),
            3,
            EditEventArgs::default(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Failed to load event 3"));
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut draft = EventDraft {
            title: "Jazz Night".to_string(),
            description: "Live music".to_string(),
            start_time: "2024-03-15T19:00".to_string(),
            end_time: "2024-03-15T22:00".to_string(),
            category_ids: vec![1, 2],
            ..Default::default()
        };

        EditEventArgs {
            title: Some("Jazz Brunch".to_string()),
            add_categories: vec![3, 1],
            remove_categories: vec![2],
            ..Default::default()
        }
        .apply(&mut draft);

        assert_eq!(draft.title, "Jazz Brunch");
        assert_eq!(draft.description, "Live music");
        assert_eq!(draft.start_time, "2024-03-15T19:00");
        assert_eq!(draft.category_ids, vec![1, 3]);
    }
}
