//! User Endpoints

use super::{read_envelope, ApiClient};
use crate::error::ApiResult;
use crate::models::User;

impl ApiClient {
    pub async fn fetch_users(&self) -> ApiResult<Vec<User>> {
        let response = self.http.get(self.url("/users")).send().await?;
        read_envelope("GET /users", response).await
    }
}
