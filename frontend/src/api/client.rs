use std::rc::Rc;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Response,
};
use serde::de::DeserializeOwned;

use crate::{
    api::types::{ApiError, ErrorBody},
    config,
    utils::storage::{self as storage_utils, CredentialStore},
};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    credentials: Rc<dyn CredentialStore>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            credentials: storage_utils::default_credentials(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    /// Signs requests with the token held by `credentials`.
    pub fn with_credentials(mut self, credentials: Rc<dyn CredentialStore>) -> Self {
        self.credentials = credentials;
        self
    }

    pub(super) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(super) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(super) fn get_auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self
            .credentials
            .load()
            .ok_or(ApiError::MissingCredential)?;
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidCredential)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    pub(super) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.message(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

pub(super) fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
