//! Publication tracker API client

use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

static APP_USER_AGENT: &str =
    concat!("RS", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone)]
pub struct PubTracker {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl Default for PubTracker {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: None,
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(APP_USER_AGENT)
                .build()
                .unwrap(),
        }
    }
}

impl PubTracker {
    /// Create a new client for the API mounted at `base_url` (no trailing slash)
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Create a new client with a bearer token
    pub fn with_token(base_url: &str, token: &str) -> Self {
        Self {
            token: Some(token.to_owned()),
            ..Self::new(base_url)
        }
    }

    /// Create a new client from the environment variables `PUBTRACK_API_URL`
    /// and (optionally) `PUBTRACK_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PUBTRACK_API_URL")
            .map_err(|_| Error::Validation("PUBTRACK_API_URL is not set".to_owned()))?;
        let mut client = Self::new(&base_url);
        client.token = std::env::var("PUBTRACK_API_TOKEN").ok();
        Ok(client)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub async fn query<Q: Query>(&self, query: &Q) -> Result<Q::Response> {
        query.query(self).await
    }
}

/// One logical API operation: parameters in, typed response out.
pub trait Query {
    type Response;

    fn query(
        &self,
        client: &PubTracker,
    ) -> impl std::future::Future<Output = Result<Self::Response>> + Send;
}

pub(crate) fn build_request(client: &PubTracker, method: Method, path: &str) -> RequestBuilder {
    let url = client.url(path);
    let mut req_builder = match method {
        Method::Get => client.client().get(url),
        Method::Post => client.client().post(url),
    };
    if let Some(token) = client.token() {
        req_builder = req_builder.bearer_auth(token);
    }
    req_builder
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Method {
    Get,
    Post,
}

/// Decode a 2xx JSON body, or turn the response into an [`Error`].
pub(crate) async fn expect_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    match resp.status() {
        StatusCode::OK | StatusCode::ACCEPTED => resp
            .json::<T>()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string())),
        status => Err(error_from_response(status, resp).await),
    }
}

pub(crate) async fn error_from_response(status: StatusCode, resp: Response) -> Error {
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                "request failed".to_owned()
            } else {
                body.clone()
            }
        });
    Error::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = PubTracker::new("http://localhost:8000/api/");
        assert_eq!(
            client.url("/stats/keywords/"),
            "http://localhost:8000/api/stats/keywords/"
        );
    }

    #[test]
    fn test_with_token_keeps_base_url() {
        let client = PubTracker::with_token("http://localhost:8000/api", "TEST_TOKEN");
        assert_eq!(client.token(), Some("TEST_TOKEN"));
        assert_eq!(client.url("/index/"), "http://localhost:8000/api/index/");
    }
}
