//! HTTP access to the users API

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ApiCall, EventSink, TrackedError, User};

/// Shown when a failed create carries no error message
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create user";

/// Shown when a failed list carries no error message
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch users";

/// Errors surfaced to client components
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The server answered with a body that could not be read
    #[error("Invalid response from server")]
    InvalidResponse,

    /// The request never got an answer
    #[error("{0}")]
    Network(String),
}

/// Body sent to `POST /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUserPayload {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Port for the users API, implemented over HTTP and mocked in tests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ClientError>;
    async fn create_user(&self, payload: &NewUserPayload) -> Result<User, ClientError>;
}

/// Users API client using reqwest
#[derive(Debug, Clone)]
pub struct HttpUsersClient {
    client: reqwest::Client,
    base_url: String,
    events: Arc<dyn EventSink>,
}

impl HttpUsersClient {
    pub fn new(base_url: impl Into<String>, events: Arc<dyn EventSink>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            events,
        }
    }

    fn users_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        context: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let start = Instant::now();
        let result = request.send().await;
        let elapsed = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                self.events.api_call(ApiCall::new(
                    method,
                    "/api/users",
                    Some(response.status().as_u16()),
                    elapsed,
                ));
                Ok(response)
            }
            Err(e) => {
                self.events
                    .api_call(ApiCall::new(method, "/api/users", None, elapsed));
                self.events.error(TrackedError::new(e.to_string(), context));
                Err(ClientError::Network(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl UsersApi for HttpUsersClient {
    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self
            .send(self.client.get(self.users_url()), "GET", "list_users")
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, LIST_FAILED_MESSAGE).await);
        }

        response
            .json()
            .await
            .map_err(|_| ClientError::InvalidResponse)
    }

    async fn create_user(&self, payload: &NewUserPayload) -> Result<User, ClientError> {
        let response = self
            .send(
                self.client.post(self.users_url()).json(payload),
                "POST",
                "create_user",
            )
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response, CREATE_FAILED_MESSAGE).await);
        }

        response
            .json()
            .await
            .map_err(|_| ClientError::InvalidResponse)
    }
}

/// Read the server's `{error}` body, falling back when it has none
async fn api_error(response: reqwest::Response, fallback: &str) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| fallback.to_string());

    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::infrastructure::telemetry::RecordingEventSink;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> (HttpUsersClient, Arc<RecordingEventSink>) {
        let events = Arc::new(RecordingEventSink::new());
        (HttpUsersClient::new(server.uri(), events.clone()), events)
    }

    #[tokio::test]
    async fn test_list_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Jane Smith", "email": "jane@example.com"}
            ])))
            .mount(&server)
            .await;
        let (client, events) = client(&server);

        let users = client.list_users().await.unwrap();

        assert_eq!(
            users,
            vec![User::new(UserId::new(1), "Jane Smith", "jane@example.com")]
        );
        assert_eq!(events.api_calls()[0].status, Some(200));
    }

    #[tokio::test]
    async fn test_list_users_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "disk I/O error"})),
            )
            .mount(&server)
            .await;
        let (client, events) = client(&server);

        let err = client.list_users().await.unwrap_err();

        assert_eq!(
            err,
            ClientError::Api {
                status: 500,
                message: "disk I/O error".to_string()
            }
        );
        assert_eq!(events.failed_api_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_create_user_sends_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .and(body_json(json!({"name": "Jane", "email": "jane@example.com"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"id": 7, "name": "Jane", "email": "jane@example.com"}
            )))
            .expect(1)
            .mount(&server)
            .await;
        let (client, _) = client(&server);

        let user = client
            .create_user(&NewUserPayload {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id(), UserId::new(7));
    }

    #[tokio::test]
    async fn test_create_user_conflict_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"error": "Email already exists"})),
            )
            .mount(&server)
            .await;
        let (client, _) = client(&server);

        let err = client
            .create_user(&NewUserPayload {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already exists");
    }

    #[tokio::test]
    async fn test_create_user_error_without_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;
        let (client, _) = client(&server);

        let err = client
            .create_user(&NewUserPayload {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), CREATE_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_create_user_unparseable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .mount(&server)
            .await;
        let (client, _) = client(&server);

        let err = client
            .create_user(&NewUserPayload {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ClientError::InvalidResponse);
        assert_eq!(err.to_string(), "Invalid response from server");
    }

    #[tokio::test]
    async fn test_network_failure_is_tracked() {
        // Bind then release a port so nothing is listening on it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let events = Arc::new(RecordingEventSink::new());
        let client = HttpUsersClient::new(uri, events.clone());

        let err = client.list_users().await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(events.api_calls()[0].status, None);
        assert_eq!(events.errors()[0].context, "list_users");
    }
}
