//! Read-only snapshot of the reference data shared by every view.

use crate::event::{Category, Event, User};
use crate::query::EventQueryEngine;

/// Categories and users as fetched at one point in time.
/// Passed explicitly to whatever needs them; never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub users: Vec<User>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>, users: Vec<User>) -> Self {
        Catalog { categories, users }
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn creator_of(&self, event: &Event) -> Option<&User> {
        self.user(event.created_by?)
    }

    pub fn category_names(&self, engine: &EventQueryEngine, event: &Event) -> Vec<String> {
        engine.resolve_category_names(&event.category_ids, &self.categories)
    }
}
