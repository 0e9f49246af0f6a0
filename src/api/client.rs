//! HTTP client for the Finder API
//!
//! A thin wrapper around reqwest configured once per process with the API
//! origin. The bearer token lives in a single mutable default-header slot
//! shared by all requests; only the session manager writes to it. The slot is
//! consulted when each request is sent, never captured earlier, so a token
//! installed or cleared mid-process applies to every subsequent request.

use crate::auth::TokenStore;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Wrapper around the reqwest HTTP client targeting the Finder API
#[derive(Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
    auth_header: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// If the token store already holds a live token (the common reload-after-
    /// login case), the Authorization header is pre-populated from it.
    pub fn new(config: &ApiConfig, store: &TokenStore) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let auth_header = store.read().map(|token| format!("Bearer {}", token));

        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: Arc::new(RwLock::new(auth_header)),
        })
    }

    /// Install `Authorization: Bearer <token>` for all subsequent requests
    pub async fn set_auth_header(&self, token: &str) {
        *self.auth_header.write().await = Some(format!("Bearer {}", token));
    }

    /// Remove the Authorization header from subsequent requests
    pub async fn clear_auth_header(&self) {
        *self.auth_header.write().await = None;
    }

    /// Current Authorization header value, if one is installed
    pub async fn auth_header(&self) -> Option<String> {
        self.auth_header.read().await.clone()
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self.request(Method::GET, path).await.query(query);
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode a JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await.json(body);
        let response = request.send().await?;
        Self::decode(response).await
    }

    /// POST a JSON body, discarding the response body
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.request(Method::POST, path).await.json(body);
        let response = request.send().await?;
        Self::check(response).await
    }

    /// POST with no body, discarding the response body
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let request = self.request(Method::POST, path).await;
        let response = request.send().await?;
        Self::check(response).await
    }

    /// POST a multipart form, discarding the response body
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<()> {
        let request = self.request(Method::POST, path).await.multipart(form);
        let response = request.send().await?;
        Self::check(response).await
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, path).await;
        let response = request.send().await?;
        Self::check(response).await
    }

    /// Build a request against the configured origin, attaching the bearer
    /// header if one is installed right now
    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.inner.request(method, url);
        if let Some(header) = self.auth_header.read().await.as_ref() {
            request = request.header(AUTHORIZATION, header);
        }
        request
    }

    /// Decode a JSON response, mapping non-2xx statuses to errors
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::error_for_status(response).await?;
        Ok(response.json().await?)
    }

    /// Discard the response body, mapping non-2xx statuses to errors
    async fn check(response: Response) -> Result<()> {
        Self::error_for_status(response).await?;
        Ok(())
    }

    async fn error_for_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::AuthRejected {
                status: status.as_u16(),
                message,
            }),
            _ => Err(Error::Http {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The API reports errors as `{"message": "..."}`; anything else is passed
/// through verbatim.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_json_body() {
        assert_eq!(
            extract_message(r#"{"message":"bad credentials"}"#),
            "bad credentials"
        );
    }

    #[test]
    fn test_extract_message_from_plain_body() {
        assert_eq!(extract_message("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_extract_message_from_empty_body() {
        assert_eq!(extract_message(""), "no response body");
    }
}
