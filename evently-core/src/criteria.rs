//! Filter criteria for event queries.

/// What to filter events by.
/// An empty search term and a `None` category mean unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Lowercase search text
    search_term: String,
    pub category_id: Option<i64>,
}

impl FilterCriteria {
    /// Criteria that match every event.
    pub fn all() -> Self {
        FilterCriteria::default()
    }

    /// Build criteria from raw user input.
    /// - `search`: free text, lowercased once here
    /// - `category`: selection value; blank or non-numeric means any category
    pub fn from_input(search: &str, category: Option<&str>) -> Self {
        FilterCriteria {
            search_term: search.to_lowercase(),
            category_id: category.and_then(parse_category_id),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.category_id.is_none()
    }
}

/// Coerce a selection value such as `"2"` or `" 2 "` to a category id.
fn parse_category_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
