pub mod categories;
pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod show;

use anyhow::Result;
use evently_core::Category;

/// Fail if any id names no known category.
pub(crate) fn require_known_categories(categories: &[Category], ids: &[i64]) -> Result<()> {
    let unknown: Vec<String> = ids
        .iter()
        .filter(|id| !categories.iter().any(|c| c.id == **id))
        .map(|id| id.to_string())
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    let available: Vec<String> = categories
        .iter()
        .map(|c| format!("{} ({})", c.id, c.name))
        .collect();

    anyhow::bail!(
        "Unknown category id(s): {}. Available: {}",
        unknown.join(", "),
        available.join(", ")
    );
}

#[cfg(test)]
pub(crate) fn mock_client(server: &httpmock::MockServer) -> crate::client::Client {
    crate::client::Client::new(&server.base_url(), std::time::Duration::from_secs(5)).unwrap()
}
