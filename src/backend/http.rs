//! REST Backend Client
//!
//! HTTP client for the party backend's REST API.
//!
//! - `GET  {base}/health`
//! - `GET  {base}/categories`
//! - `POST {base}/cards`
//! - `PUT  {base}/cards/{id}/category`
//! - `PUT  {base}/cards/{id}`

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::{BackendError, BackendResult};
use super::Backend;
use crate::board::{Card, CardUpdate, Category, NewCard};

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL including the API prefix (e.g., "http://localhost:8080/api")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// [`Backend`] over HTTP
pub struct HttpBackend {
    client: Client,
    config: HttpBackendConfig,
}

impl HttpBackend {
    /// Create a client with the given configuration
    pub fn new(config: HttpBackendConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let config = HttpBackendConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn card_url(&self, card_id: &str, suffix: &str) -> String {
        self.url(&format!("/cards/{}{}", urlencoding::encode(card_id), suffix))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(method = %method, url = %url, "API request");
        self.client.request(method, url)
    }

    async fn send(&self, builder: RequestBuilder) -> BackendResult<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "API request failed");
            BackendError::from(e)
        })?;

        tracing::debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "API response"
        );
        Ok(response)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn health_check(&self) -> BackendResult<bool> {
        let response = self
            .send(self.request(Method::GET, &self.url("/health")))
            .await?;
        Ok(response.status().is_success())
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        let response = self
            .send(self.request(Method::GET, &self.url("/categories")))
            .await?;
        read_json(response).await
    }

    async fn create_card(&self, card: NewCard) -> BackendResult<Card> {
        let builder = self.request(Method::POST, &self.url("/cards")).json(&card);
        read_json(self.send(builder).await?).await
    }

    async fn update_card_category(&self, card_id: &str, category_id: &str) -> BackendResult<Card> {
        let body = MoveRequest {
            category_id: category_id.to_string(),
        };
        let builder = self
            .request(Method::PUT, &self.card_url(card_id, "/category"))
            .json(&body);
        read_json(self.send(builder).await?).await
    }

    async fn update_card(&self, card_id: &str, update: CardUpdate) -> BackendResult<Card> {
        let builder = self
            .request(Method::PUT, &self.card_url(card_id, ""))
            .json(&update);
        read_json(self.send(builder).await?).await
    }
}

/// Decode a success body, or map an error status to [`BackendError`]
async fn read_json<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()));
    }

    match status.as_u16() {
        503 => Err(BackendError::StartingUp),
        429 => Err(BackendError::RateLimited),
        code => {
            let text = response.text().await.unwrap_or_default();
            Err(BackendError::Api {
                status: code,
                message: error_message(&text, status.canonical_reason()),
            })
        }
    }
}

/// Pull the message out of an `{"error": "..."}` body
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    reason.unwrap_or("Request failed").to_string()
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct MoveRequest {
    category_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpBackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_urls() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://party.local/api/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(backend.url("/categories"), "http://party.local/api/categories");
        assert_eq!(
            backend.card_url("a b/c", "/category"),
            "http://party.local/api/cards/a%20b%2Fc/category"
        );
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error": "Card not found"}"#, Some("Not Found")),
            "Card not found"
        );
        assert_eq!(error_message("boom", Some("Bad Request")), "boom");
        assert_eq!(error_message("", Some("Bad Request")), "Bad Request");
        assert_eq!(error_message("", None), "Request failed");
    }

    async fn spawn_server() -> (HttpBackend, tokio::sync::oneshot::Sender<()>) {
        use crate::api::{serve_listener, AppState};
        use crate::config::ServerConfig;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        let state = AppState::seeded(ServerConfig {
            default_capacity: 1,
            ..Default::default()
        });
        tokio::spawn(serve_listener(listener, state, async move {
            let _ = stopped.await;
        }));

        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: format!("http://{}/api", addr),
            ..Default::default()
        })
        .unwrap();
        (backend, stop)
    }

    #[tokio::test]
    async fn test_against_reference_server() {
        let (backend, _stop) = spawn_server().await;

        assert!(backend.health_check().await.unwrap());
        assert_eq!(backend.list_categories().await.unwrap().len(), 4);

        let card = backend
            .create_card(NewCard {
                couple_name: "Merckis".to_string(),
                dish_name: "Guacamole".to_string(),
                dietary_restrictions: String::new(),
                category_id: "appetizers".to_string(),
            })
            .await
            .unwrap();

        let moved = backend.update_card_category(&card.id, "sides").await.unwrap();
        assert_eq!(moved.category_id, "sides");

        let updated = backend
            .update_card(
                &card.id,
                CardUpdate {
                    dish_name: Some("Chips & Guac".to_string()),
                    dietary_restrictions: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.dish_name, "Chips & Guac");

        let categories = backend.list_categories().await.unwrap();
        assert_eq!(categories[1].cards, vec![updated]);
    }

    #[tokio::test]
    async fn test_error_bodies_surface_as_messages() {
        let (backend, _stop) = spawn_server().await;

        let err = backend
            .update_card_category("missing", "main")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Card not found");

        let new_card = |couple: &str| NewCard {
            couple_name: couple.to_string(),
            dish_name: "Pie".to_string(),
            dietary_restrictions: String::new(),
            category_id: "desserts".to_string(),
        };
        backend.create_card(new_card("Baker")).await.unwrap();
        let err = backend.create_card(new_card("Emsky")).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Category is full (max 1 items)");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let backend = HttpBackend::new(HttpBackendConfig {
            // Port 9 (discard) on localhost is closed in test environments
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_ms: 2_000,
        })
        .unwrap();

        let err = backend.list_categories().await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
