//! Editable event payloads for the create and edit flows.

use serde::{Deserialize, Serialize};

use crate::datetime::to_local_datetime_string;
use crate::error::{EventlyError, EventlyResult};
use crate::event::Event;

/// The user-editable part of an event, as submitted to the backend.
/// Serializes without an `id`; the server assigns one on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub start_time: String,
    pub end_time: String,
    pub category_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
}

impl EventDraft {
    /// Prefill a draft from an existing event.
    /// Times are converted to local `YYYY-MM-DDTHH:MM` form values.
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone(),
            image: event.image.clone(),
            start_time: to_local_datetime_string(Some(&event.start_time)),
            end_time: to_local_datetime_string(Some(&event.end_time)),
            category_ids: event.category_ids.clone(),
            created_by: event.created_by,
        }
    }

    /// Check or uncheck a category.
    pub fn toggle_category(&mut self, category_id: i64, checked: bool) {
        if checked {
            if !self.category_ids.contains(&category_id) {
                self.category_ids.push(category_id);
            }
        } else {
            self.category_ids.retain(|id| *id != category_id);
        }
    }

    /// Title, description, start and end time are required.
    pub fn validate(&self) -> EventlyResult<()> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("startTime", &self.start_time),
            ("endTime", &self.end_time),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(EventlyError::Validation(field));
            }
        }

        Ok(())
    }

    /// The event as it looks after this draft replaced its editable fields.
    pub fn apply_to(&self, event: &Event) -> Event {
        Event {
            id: event.id,
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            category_ids: self.category_ids.clone(),
            created_by: self.created_by.or(event.created_by),
        }
    }
}
