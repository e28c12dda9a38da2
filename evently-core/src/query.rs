//! Event filtering and category name resolution.
//!
//! Everything here is a pure function of its arguments: no I/O, no retained
//! state between calls. Output order always follows input order.

use serde_json::Value;

use crate::criteria::FilterCriteria;
use crate::error::EventlyResult;
use crate::event::{Category, Event};
use crate::normalize;

/// Label used for unresolvable category ids when placeholders are enabled.
pub const DEFAULT_UNKNOWN_CATEGORY_LABEL: &str = "Unknown Category";

/// What to do with category ids that match no known category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnknownCategory {
    /// Leave them out of the result
    #[default]
    Drop,
    /// Render them as the given label
    Placeholder(String),
}

impl UnknownCategory {
    pub fn placeholder() -> Self {
        UnknownCategory::Placeholder(DEFAULT_UNKNOWN_CATEGORY_LABEL.to_string())
    }
}

/// Filters events and resolves their category names.
#[derive(Debug, Clone, Default)]
pub struct EventQueryEngine {
    unknown_category: UnknownCategory,
}

impl EventQueryEngine {
    pub fn new(unknown_category: UnknownCategory) -> Self {
        EventQueryEngine { unknown_category }
    }

    pub fn filter_events(&self, events: &[Event], criteria: &FilterCriteria) -> Vec<Event> {
        filter_events(events, criteria)
    }

    /// Like [`filter_events`](Self::filter_events), for an unparsed payload.
    /// Fails with `InvalidInput` if `events` is not a JSON array.
    pub fn filter_events_value(
        &self,
        events: &Value,
        criteria: &FilterCriteria,
    ) -> EventlyResult<Vec<Event>> {
        let events = normalize::event_list(events)?;
        Ok(filter_events(&events, criteria))
    }

    pub fn resolve_category_names(&self, category_ids: &[i64], categories: &[Category]) -> Vec<String> {
        resolve_category_names(category_ids, categories, &self.unknown_category)
    }

    /// Like [`resolve_category_names`](Self::resolve_category_names), for
    /// unparsed inputs. Malformed inputs resolve to nothing.
    pub fn resolve_category_names_value(&self, category_ids: &Value, categories: &Value) -> Vec<String> {
        let ids = normalize::id_list(Some(category_ids));
        let categories = normalize::category_list(Some(categories));
        resolve_category_names(&ids, &categories, &self.unknown_category)
    }
}

/// Keep the events matching both the search term and the category.
pub fn filter_events(events: &[Event], criteria: &FilterCriteria) -> Vec<Event> {
    let filtered: Vec<Event> = events
        .iter()
        .filter(|event| matches_search(event, criteria.search_term()))
        .filter(|event| matches_category(event, criteria.category_id))
        .cloned()
        .collect();

    tracing::trace!(
        total = events.len(),
        kept = filtered.len(),
        search = criteria.search_term(),
        category = ?criteria.category_id,
        "Filtered events"
    );

    filtered
}

/// `term` must already be lowercase.
fn matches_search(event: &Event, term: &str) -> bool {
    term.is_empty()
        || event.title.to_lowercase().contains(term)
        || event.description.to_lowercase().contains(term)
}

fn matches_category(event: &Event, category_id: Option<i64>) -> bool {
    match category_id {
        Some(id) => event.has_category(id),
        None => true,
    }
}

/// Map category ids to names, in id order.
/// Duplicate categories: the first one with a matching id wins.
pub fn resolve_category_names(
    category_ids: &[i64],
    categories: &[Category],
    unknown: &UnknownCategory,
) -> Vec<String> {
    category_ids
        .iter()
        .filter_map(|id| match categories.iter().find(|c| c.id == *id) {
            Some(category) => Some(category.name.clone()),
            None => match unknown {
                UnknownCategory::Drop => None,
                UnknownCategory::Placeholder(label) => Some(label.clone()),
            },
        })
        .collect()
}
