//! Board Endpoints

use super::{read_envelope, ApiClient};
use crate::error::ApiResult;
use crate::models::Board;

impl ApiClient {
    pub async fn fetch_boards(&self) -> ApiResult<Vec<Board>> {
        let response = self.http.get(self.url("/boards")).send().await?;
        read_envelope("GET /boards", response).await
    }
}
