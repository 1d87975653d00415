//! REST API Wrappers
//!
//! Frontend bindings to the task server, organized by domain.

mod boards;
mod tasks;
mod users;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Board, Envelope, NewTask, Task, User};

/// Remote operations the views and the drag handler depend on
///
/// Futures are `!Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait TaskBackend {
    async fn list_boards(&self) -> ApiResult<Vec<Board>>;

    /// All tasks, or only those of one board
    async fn list_tasks(&self, board_id: Option<u32>) -> ApiResult<Vec<Task>>;

    async fn list_users(&self) -> ApiResult<Vec<User>>;

    async fn create_task(&self, task: &NewTask) -> ApiResult<Task>;

    /// Replace a task; the server echoes the stored version
    async fn update_task(&self, task: &Task) -> ApiResult<Task>;
}

/// HTTP client bound to one API origin
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_millis(config.request_timeout_ms));
        let http = builder.build().unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        });
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl TaskBackend for ApiClient {
    async fn list_boards(&self) -> ApiResult<Vec<Board>> {
        self.fetch_boards().await
    }

    async fn list_tasks(&self, board_id: Option<u32>) -> ApiResult<Vec<Task>> {
        self.fetch_tasks(board_id).await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.fetch_users().await
    }

    async fn create_task(&self, task: &NewTask) -> ApiResult<Task> {
        self.post_task(task).await
    }

    async fn update_task(&self, task: &Task) -> ApiResult<Task> {
        self.put_task(task).await
    }
}

/// Check the status and unwrap the `{ data }` envelope of a response
async fn read_envelope<T: DeserializeOwned>(endpoint: &str, response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason()),
        });
    }
    parse_envelope(endpoint, &body)
}

fn parse_envelope<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })
}

/// Best human-readable message for a failed response
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 {
        return trimmed.to_string();
    }
    reason.unwrap_or("unknown error").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn envelope_yields_data() {
        let body = r#"{"data":[{"id":1,"name":"Roadmap","description":"","taskCount":2}]}"#;
        let boards: Vec<Board> = parse_envelope("GET /boards", body).unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].task_count, 2);
    }

    #[test]
    fn missing_data_is_unexpected_response() {
        let err = parse_envelope::<Vec<Task>>("GET /tasks", r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse { ref endpoint, .. } if endpoint == "GET /tasks"));
    }

    #[test]
    fn wrong_shape_is_unexpected_response() {
        let body = r#"{"data":{"id":1,"title":"t","status":"Someday","priority":"Low","boardId":1}}"#;
        let err = parse_envelope::<Task>("PUT /tasks/update/1", body).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse { .. }));
    }

    #[test]
    fn single_task_envelope() {
        let body = r#"{"data":{"id":5,"title":"t","status":"Done","priority":"Low","assignee":null,"boardId":1}}"#;
        let task: Task = parse_envelope("POST /tasks/create", body).unwrap();
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"message":"Task not found"}"#, Some("Not Found")), "Task not found");
        assert_eq!(error_message(r#"{"error":"bad board"}"#, None), "bad board");
    }

    #[test]
    fn error_message_falls_back_to_reason() {
        assert_eq!(error_message("", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message("plain text failure", Some("Bad Gateway")), "plain text failure");
        assert_eq!(error_message("", None), "unknown error");
    }

    #[test]
    fn urls_are_rooted_at_api_v1() {
        let config = AppConfig {
            api_base_url: "https://kanban.example.com/".into(),
            ..AppConfig::default()
        };
        let client = ApiClient::new(&config);
        assert_eq!(client.url("/tasks"), "https://kanban.example.com/api/v1/tasks");
    }
}
