//! Event, category and user records as served by the backend.
//!
//! Field names follow the backend's camelCase JSON. Deserialization is
//! lenient: a record with missing or wrong-shaped fields still loads, with
//! those fields normalized to empty (see [`crate::normalize`]).

use serde::{Deserialize, Serialize};

use crate::normalize;

/// An event record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-assigned identifier
    #[serde(default, deserialize_with = "normalize::de_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "normalize::de_string")]
    pub title: String,
    #[serde(default, deserialize_with = "normalize::de_string")]
    pub description: String,
    /// Image URL, empty when the event has none
    #[serde(default, deserialize_with = "normalize::de_string")]
    pub image: String,
    /// ISO-8601 start, kept as the server sent it
    #[serde(default, deserialize_with = "normalize::de_string")]
    pub start_time: String,
    /// ISO-8601 end, kept as the server sent it
    #[serde(default, deserialize_with = "normalize::de_string")]
    pub end_time: String,
    #[serde(default, deserialize_with = "normalize::de_id_list")]
    pub category_ids: Vec<i64>,
    /// Id of the user who created the event
    #[serde(
        default,
        deserialize_with = "normalize::de_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_by: Option<i64>,
}

/// A named tag attachable to events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Category {
            id,
            name: name.into(),
        }
    }
}

/// A user who can create events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "normalize::de_string")]
    pub name: String,
    /// Avatar URL
    #[serde(default, deserialize_with = "normalize::de_string")]
    pub image: String,
}

impl Event {
    pub fn has_category(&self, category_id: i64) -> bool {
        self.category_ids.contains(&category_id)
    }
}
