use super::{
    client::{transport_error, ApiClient},
    types::{ApiError, LoginRequest, TokenResponse, UserProfile},
};

impl ApiClient {
    /// `POST /auth/login` as an OAuth2 password form.
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .post(format!("{}/auth/login", base_url))
            .form(request)
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode(response).await
    }

    pub async fn get_me(&self) -> Result<UserProfile, ApiError> {
        let headers = self.get_auth_headers()?;
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .get(format!("{}/auth/me", base_url))
            .headers(headers)
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode(response).await
    }
}
