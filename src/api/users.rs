//! Token and user endpoints.

use super::{endpoints, Access, ApiClient};
use crate::errors::AppError;
use crate::models::{TokenResponse, User};

impl ApiClient {
    /// POST /token - Exchange credentials for a bearer token.
    pub async fn request_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, AppError> {
        let builder = self
            .post(endpoints::TOKEN)
            .form(&[("username", username), ("password", password)]);

        let response = self.execute(builder, Access::Public).await?;
        Ok(response.json::<TokenResponse>().await?)
    }

    /// GET /users/ - All staff accounts.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.fetch(self.get(endpoints::USERS)).await
    }
}
