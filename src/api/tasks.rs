//! Task Endpoints

use super::{read_envelope, ApiClient};
use crate::error::ApiResult;
use crate::models::{NewTask, Task};

impl ApiClient {
    pub async fn fetch_tasks(&self, board_id: Option<u32>) -> ApiResult<Vec<Task>> {
        let mut request = self.http.get(self.url("/tasks"));
        if let Some(id) = board_id {
            request = request.query(&[("boardId", id)]);
        }
        let response = request.send().await?;
        read_envelope("GET /tasks", response).await
    }

    pub async fn post_task(&self, task: &NewTask) -> ApiResult<Task> {
        let response = self.http.post(self.url("/tasks/create")).json(task).send().await?;
        read_envelope("POST /tasks/create", response).await
    }

    pub async fn put_task(&self, task: &Task) -> ApiResult<Task> {
        let path = format!("/tasks/update/{}", task.id);
        let response = self.http.put(self.url(&path)).json(task).send().await?;
        read_envelope(&format!("PUT {}", path), response).await
    }
}
