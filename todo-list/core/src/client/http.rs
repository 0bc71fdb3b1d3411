//! `reqwest`-based implementation of the task client.
//!
//! Talks to a JSON REST backend laid out as:
//! `GET /tasks`, `POST /tasks`, `PUT /tasks/{id}`, `DELETE /tasks/{id}`,
//! all relative to the configured base URL.

use crate::client::{Error, TaskClient};
use crate::config::ClientConfig;
use crate::session::SessionContext;
use crate::task::{Task, TaskId};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Task client that talks HTTP to the backend.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpTaskClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpTaskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Builds a client for the configured backend, authenticated with the
    /// session's token when there is one.
    pub fn for_session(config: &ClientConfig, session: Option<&SessionContext>) -> Self {
        Self::new(config.api_base_url.clone())
            .with_bearer_token(session.and_then(|session| session.token.clone()))
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn send(request: RequestBuilder) -> Result<Response, Error> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    warn!("Backend answered {status}: {message}");
    Err(match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
        StatusCode::NOT_FOUND => Error::NotFound,
        _ => Error::Server {
            status: status.as_u16(),
            message,
        },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let status = response.status().as_u16();
    response.json::<T>().await.map_err(|e| Error::Server {
        status,
        message: format!("Invalid response body: {e}"),
    })
}

impl TaskClient for HttpTaskClient {
    #[instrument(skip(self))]
    async fn list_tasks(&self) -> Result<Vec<Task>, Error> {
        let response = send(self.request(Method::GET, "tasks")).await?;
        let tasks: Vec<Task> = decode(response).await?;
        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create_task(&self, draft: &Task) -> Result<Task, Error> {
        let response = send(self.request(Method::POST, "tasks").json(draft)).await?;
        let status = response.status().as_u16();
        let created: Task = decode(response).await?;
        if !created.is_persisted() {
            return Err(Error::Server {
                status,
                message: "Created task has no identifier".to_string(),
            });
        }
        Ok(created)
    }

    #[instrument(skip(self, task), fields(id = ?task.id))]
    async fn update_task(&self, task: &Task) -> Result<(), Error> {
        let Some(id) = task.id else {
            return Err(Error::Validation("Task has no identifier".to_string()));
        };
        send(self.request(Method::PUT, &format!("tasks/{id}")).json(task)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: TaskId) -> Result<(), Error> {
        send(self.request(Method::DELETE, &format!("tasks/{id}"))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, HttpTaskClient) {
        let _ = tracing_subscriber::fmt().try_init();
        let server = MockServer::start().await;
        let client = HttpTaskClient::new(format!("{}/api/", server.uri()));
        (server, client)
    }

    fn stored_task(id: TaskId, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "completed": false,
            "status": "To Do",
            "category": ""
        })
    }

    #[test]
    fn url_joins_segments() {
        let client = HttpTaskClient::new("http://localhost:3000/api/");
        assert_eq!(client.url("/tasks/3"), "http://localhost:3000/api/tasks/3");
    }

    #[test]
    fn for_session_uses_config_and_token() {
        let config = ClientConfig::default();
        let session = SessionContext {
            email: "ada@example.com".to_string(),
            token: Some("secret".to_string()),
        };

        let client = HttpTaskClient::for_session(&config, Some(&session));

        assert_eq!(client.base_url(), config.api_base_url);
        assert_eq!(client.bearer_token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn list_tasks_decodes_records() {
        // Arrange
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                stored_task(1, "First"),
                stored_task(2, "Second")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        // Act
        let tasks = client.list_tasks().await.unwrap();

        // Assert
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, Some(1));
        assert_eq!(tasks[1].title, "Second");
    }

    #[tokio::test]
    async fn requests_carry_bearer_token() {
        let (server, client) = setup().await;
        let client = client.with_bearer_token(Some("abc123".to_string()));
        Mock::given(method("GET"))
            .and(path("/api/tasks"))
            .and(header("Authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client.list_tasks().await.unwrap();

        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn create_task_posts_draft_and_returns_stored_record() {
        // Arrange
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .and(body_json(serde_json::json!({
                "title": "Buy milk",
                "completed": false,
                "status": "To Do",
                "category": ""
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(stored_task(42, "Buy milk")))
            .expect(1)
            .mount(&server)
            .await;

        // Act
        let created = client.create_task(&Task::draft("Buy milk")).await.unwrap();

        // Assert
        assert_eq!(created.id, Some(42));
        assert_eq!(created.status, Status::ToDo);
    }

    #[tokio::test]
    async fn create_task_requires_identifier_in_response() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/tasks"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "title": "Buy milk"
            })))
            .mount(&server)
            .await;

        let result = client.create_task(&Task::draft("Buy milk")).await;

        assert!(matches!(result, Err(Error::Server { status: 201, .. })));
    }

    #[tokio::test]
    async fn update_task_puts_full_record() {
        let (server, client) = setup().await;
        let mut task = Task::draft("Renamed");
        task.id = Some(42);
        Mock::given(method("PUT"))
            .and(path("/api/tasks/42"))
            .and(body_json(serde_json::to_value(&task).unwrap()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.update_task(&task).await;

        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn update_task_without_id_sends_nothing() {
        let (server, client) = setup().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let result = client.update_task(&Task::draft("Draft")).await;

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn delete_task_targets_id() {
        let (server, client) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/tasks/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(client.delete_task(7).await, Ok(()));
    }

    mod error_mapping_tests {
        use super::*;

        async fn delete_with_status(status: u16, body: &str) -> Result<(), Error> {
            let (server, client) = setup().await;
            Mock::given(method("DELETE"))
                .and(path("/api/tasks/1"))
                .respond_with(ResponseTemplate::new(status).set_body_string(body))
                .mount(&server)
                .await;
            client.delete_task(1).await
        }

        #[tokio::test]
        async fn not_found() {
            assert_eq!(delete_with_status(404, "").await, Err(Error::NotFound));
        }

        #[tokio::test]
        async fn validation() {
            assert_eq!(
                delete_with_status(422, "title required").await,
                Err(Error::Validation("title required".to_string()))
            );
            assert_eq!(
                delete_with_status(400, "bad").await,
                Err(Error::Validation("bad".to_string()))
            );
        }

        #[tokio::test]
        async fn server() {
            assert_eq!(
                delete_with_status(500, "boom").await,
                Err(Error::Server {
                    status: 500,
                    message: "boom".to_string()
                })
            );
        }

        #[tokio::test]
        async fn unreadable_body_is_server_error() {
            let (server, client) = setup().await;
            Mock::given(method("GET"))
                .and(path("/api/tasks"))
                .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
                .mount(&server)
                .await;

            let result = client.list_tasks().await;

            assert!(matches!(result, Err(Error::Server { status: 200, .. })));
        }

        #[tokio::test]
        async fn unreachable_backend_is_network_error() {
            // Reserve a free port, then release it so nothing is listening
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            let port = listener.local_addr().unwrap().port();
            drop(listener);
            let client = HttpTaskClient::new(format!("http://127.0.0.1:{port}/api"));

            let result = client.list_tasks().await;

            assert!(matches!(result, Err(Error::Network(_))));
        }
    }
}
