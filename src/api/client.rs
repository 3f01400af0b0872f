//! Shared HTTP client with bearer token decoration

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::ApiError;
use crate::config::Config;

/// Thin wrapper around `reqwest::Client` carrying the API base URL and the
/// optional bearer token. Cloning is cheap; every clone shares the same
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            http,
            base_url: config.api_url_trimmed().to_string(),
            token: config.token.clone(),
        })
    }

    /// Build a request for `path` (relative to the base URL), attaching the
    /// Authorization header when a token is configured.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::decode(response).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Send a request and map transport failures and non-2xx statuses into
    /// the error taxonomy. The response body of a failed request is kept
    /// verbatim for diagnostics.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("request failed with status {}: {}", status, body);
            Err(ApiError::Server {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let body = response.text().await.map_err(ApiError::Network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    fn test_config(token: Option<&str>) -> Config {
        Config {
            api_url: "http://localhost:8080/api/".to_string(),
            token: token.map(String::from),
            http: HttpConfig::default(),
        }
    }

    #[test]
    fn test_bearer_token_attached_when_configured() {
        let client = ApiClient::new(&test_config(Some("secret"))).unwrap();
        let request = client.request(Method::GET, "/students").build().unwrap();

        let auth = request.headers().get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer secret");
    }

    #[test]
    fn test_no_auth_header_without_token() {
        let client = ApiClient::new(&test_config(None)).unwrap();
        let request = client.request(Method::GET, "/students").build().unwrap();

        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_base_url_join() {
        let client = ApiClient::new(&test_config(None)).unwrap();
        let request = client
            .request(Method::DELETE, "/students/42")
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:8080/api/students/42"
        );
    }
}
