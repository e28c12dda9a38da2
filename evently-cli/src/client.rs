//! HTTP client for the events backend.
//!
//! Every failure comes back as a typed [`EventlyError`]: transport problems
//! are `Network`, a 404 is `NotFound`, other non-2xx statuses are `Http`,
//! and bodies that do not decode are `MalformedBody`.

use std::time::Duration;

use evently_core::config::EventlyConfig;
use evently_core::normalize;
use evently_core::{Catalog, Category, Event, EventlyError, EventlyResult, User};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Collections served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Events,
    Categories,
    Users,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Events => "events",
            Resource::Categories => "categories",
            Resource::Users => "users",
        }
    }
}

/// HTTP client for the events backend
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> EventlyResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| EventlyError::Config(format!("Invalid base_url '{base_url}': {e}")))?;

        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EventlyError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &EventlyConfig) -> EventlyResult<Self> {
        Self::new(&config.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /:resource/:id
    pub async fn fetch_one<T: DeserializeOwned>(&self, resource: Resource, id: i64) -> EventlyResult<T> {
        let resp = self.send(Method::GET, resource, Some(id), None).await?;
        decode(resp).await
    }

    /// POST /:resource
    pub async fn create<T, B>(&self, resource: Resource, body: &B) -> EventlyResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = to_json(body)?;
        let resp = self.send(Method::POST, resource, None, Some(&body)).await?;
        decode(resp).await
    }

    /// PUT /:resource/:id
    pub async fn replace<T, B>(&self, resource: Resource, id: i64, body: &B) -> EventlyResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = to_json(body)?;
        let resp = self.send(Method::PUT, resource, Some(id), Some(&body)).await?;
        decode(resp).await
    }

    /// DELETE /:resource/:id
    pub async fn delete(&self, resource: Resource, id: i64) -> EventlyResult<()> {
        self.send(Method::DELETE, resource, Some(id), None).await?;
        Ok(())
    }

    /// GET /events, tolerating malformed entries.
    /// A body that is not a JSON array is `InvalidInput`.
    pub async fn fetch_events(&self) -> EventlyResult<Vec<Event>> {
        let value = self.fetch_value(Resource::Events).await?;
        normalize::event_list(&value)
    }

    /// GET /categories. Malformed entries are dropped, and a body that is not
    /// an array gives no categories.
    pub async fn fetch_categories(&self) -> EventlyResult<Vec<Category>> {
        let value = self.fetch_value(Resource::Categories).await?;
        Ok(normalize::category_list(Some(&value)))
    }

    /// GET /users. Entries without an integer id are dropped.
    pub async fn fetch_users(&self) -> EventlyResult<Vec<User>> {
        let value = self.fetch_value(Resource::Users).await?;
        Ok(normalize::user_list(Some(&value)))
    }

    /// Categories and users for the views that show an event's creator.
    /// The two are loaded independently: if users fail the catalog has none.
    pub async fn load_catalog(&self) -> EventlyResult<Catalog> {
        let (categories, users) = tokio::join!(self.fetch_categories(), self.fetch_users());

        let users = users.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load users, creators will not be shown");
            Vec::new()
        });

        Ok(Catalog::new(categories?, users))
    }

    async fn fetch_value(&self, resource: Resource) -> EventlyResult<Value> {
        let resp = self.send(Method::GET, resource, None, None).await?;
        decode(resp).await
    }

    fn url(&self, resource: Resource, id: Option<i64>) -> EventlyResult<Url> {
        let path = match id {
            Some(id) => format!("{}/{}", resource.path(), id),
            None => resource.path().to_string(),
        };

        self.base_url
            .join(&path)
            .map_err(|e| EventlyError::Config(format!("Invalid request path '{path}': {e}")))
    }

    async fn send(
        &self,
        method: Method,
        resource: Resource,
        id: Option<i64>,
        body: Option<&Value>,
    ) -> EventlyResult<Response> {
        let url = self.url(resource, id)?;
        tracing::debug!(%method, %url, "Sending request");

        let mut req = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| EventlyError::Network(format!("{method} {url}: {e}")))?;

        let status = resp.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");

        if status == StatusCode::NOT_FOUND {
            return Err(EventlyError::NotFound(format!("{method} {url}")));
        }

        if !status.is_success() {
            let text = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(%method, %url, error = %e, "Could not read error body");
                    String::new()
                }
            };
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            };
            return Err(EventlyError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> EventlyResult<T> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| EventlyError::Network(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| EventlyError::MalformedBody(e.to_string()))
}

fn to_json<B: Serialize>(body: &B) -> EventlyResult<Value> {
    serde_json::to_value(body).map_err(|e| EventlyError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evently_core::EventDraft;
    use std::collections::BTreeMap;
    use httpmock::Method::{DELETE, GET, POST, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    fn client_for(server: &MockServer) -> Client {
        Client::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = Client::new("http://localhost:3000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/api/");
        assert_eq!(
            client.url(Resource::Events, Some(4)).unwrap().as_str(),
            "http://localhost:3000/api/events/4"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = Client::new("not a url", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, EventlyError::Config(_)));
    }

    #[tokio::test]
    async fn test_fetch_events_normalizes_entries() {
        let server = MockServer::start_async().await;
        let mock = server.mock_async(|when, then| {
            when.method(GET).path("/events");
            then.status(200).json_body(json!([
                {"id": 1, "title": "Jazz Night", "categoryIds": [1]},
                {"id": 2, "title": null, "categoryIds": null}
            ]));
        }).await;

        let events = client_for(&server).fetch_events().await.unwrap();

        mock.assert_async().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category_ids, vec![1]);
        assert_eq!(events[1].title, "");
    }

    #[tokio::test]
    async fn test_fetch_events_rejects_non_array_body() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/events");
            then.status(200).json_body(json!({"events": []}));
        }).await;

        let err = client_for(&server).fetch_events().await.unwrap_err();
        assert!(matches!(err, EventlyError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_fetch_one_not_found() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/events/42");
            then.status(404).json_body(json!({}));
        }).await;

        let err = client_for(&server)
            .fetch_one::<Event>(Resource::Events, 42)
            .await
            .unwrap_err();
        assert!(matches!(err, EventlyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(500).body("boom");
        }).await;

        let err = client_for(&server).fetch_users().await.unwrap_err();

        match err {
            EventlyError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).body("<html>not json</html>");
        }).await;

        let err = client_for(&server).fetch_users().await.unwrap_err();
        assert!(matches!(err, EventlyError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = Client::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.fetch_events().await.unwrap_err();
        assert!(matches!(err, EventlyError::Network(_)));
    }

    #[tokio::test]
    async fn test_create_posts_draft_without_id() {
        let server = MockServer::start_async().await;
        let mock = server.mock_async(|when, then| {
            when.method(POST)
                .path("/events")
                .header("content-type", "application/json")
                .json_body(json!({
                    "title": "Food Fair",
                    "description": "jazz food",
                    "image": "",
                    "startTime": "2024-05-01T12:00",
                    "endTime": "2024-05-01T18:00",
                    "categoryIds": [2]
                }));
            then.status(201).json_body(json!({
                "id": 9,
                "title": "Food Fair",
                "description": "jazz food",
                "image": "",
                "startTime": "2024-05-01T12:00",
                "endTime": "2024-05-01T18:00",
                "categoryIds": [2]
            }));
        }).await;

        let draft = EventDraft {
            title: "Food Fair".to_string(),
            description: "jazz food".to_string(),
            start_time: "2024-05-01T12:00".to_string(),
            end_time: "2024-05-01T18:00".to_string(),
            category_ids: vec![2],
            ..Default::default()
        };

        let created: Event = client_for(&server)
            .create(Resource::Events, &draft)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(created.id, 9);
        assert_eq!(created.category_ids, vec![2]);
    }

    #[tokio::test]
    async fn test_replace_and_delete() {
        let server = MockServer::start_async().await;
        let put = server.mock_async(|when, then| {
            when.method(PUT).path("/events/3");
            then.status(200).json_body(json!({"id": 3, "title": "Renamed"}));
        }).await;
        let delete = server.mock_async(|when, then| {
            when.method(DELETE).path("/events/3");
            then.status(200).json_body(json!({}));
        }).await;

        let client = client_for(&server);
        let draft = EventDraft {
            title: "Renamed".to_string(),
            ..Default::default()
        };

        let updated: Event = client.replace(Resource::Events, 3, &draft).await.unwrap();
        client.delete(Resource::Events, 3).await.unwrap();

        put.assert_async().await;
        delete.assert_async().await;
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn test_load_catalog_tolerates_malformed_categories() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(200).json_body(json!([
                {"id": 1, "name": "sports"},
                {"name": "nameless"}
            ]));
        }).await;
        server.mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Ignacio Doe", "image": "https://example.com/a.jpg"},
                {"id": "2", "name": "x"}
            ]));
        }).await;

        let catalog = client_for(&server).load_catalog().await.unwrap();

        assert_eq!(catalog.categories, vec![Category::new(1, "sports")]);
        assert_eq!(catalog.user(1).map(|u| u.name.as_str()), Some("Ignacio Doe"));
        assert_eq!(catalog.users.len(), 1);
    }

    #[tokio::test]
    async fn test_load_catalog_survives_failed_users() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(200).json_body(json!([{"id": 1, "name": "sports"}]));
        }).await;
        server.mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(500).body("boom");
        }).await;

        let catalog = client_for(&server).load_catalog().await.unwrap();

        assert_eq!(catalog.categories, vec![Category::new(1, "sports")]);
        assert!(catalog.users.is_empty());
    }

    #[tokio::test]
    async fn test_load_catalog_fails_on_failed_categories() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(503);
        }).await;
        server.mock_async(|when, then| {
            when.method(GET).path("/users");
            then.status(200).json_body(json!([]));
        }).await;

        let err = client_for(&server).load_catalog().await.unwrap_err();
        assert!(matches!(err, EventlyError::Http { status: 503, .. }));
    }

    #[test]
    fn test_unencodable_body_is_serialization_error() {
        let body = BTreeMap::from([(vec![1], "non-string key")]);

        let err = to_json(&body).unwrap_err();
        assert!(matches!(err, EventlyError::Serialization(_)));
    }
}
