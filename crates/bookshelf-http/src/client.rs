//! HTTP client for the Datastore-style JSON API.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use bookshelf_core::error::{Error, StoreError, TransportError};
use bookshelf_core::types::StoreUrl;

use crate::api::ApiErrorResponse;

fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout { duration_ms: 0 }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// HTTP client for store RPC requests.
#[derive(Debug, Clone)]
pub struct DatastoreClient {
    client: reqwest::Client,
    url: StoreUrl,
    project_id: String,
    token: Option<String>,
}

impl DatastoreClient {
    /// Create a new client for the given store and project.
    pub fn new(url: StoreUrl, project_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bookshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            url,
            project_id: project_id.into(),
            token: None,
        }
    }

    /// Attach a static bearer token for authenticated deployments.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Returns the store URL this client is configured for.
    pub fn url(&self) -> &StoreUrl {
        &self.url
    }

    /// Returns the project id this client is configured for.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Call an RPC method (POST request with a JSON body).
    #[instrument(skip(self, body), fields(url = %self.url))]
    pub async fn call<B, R>(&self, method: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.url.rpc_url(&self.project_id, method);
        debug!(method, "store RPC");
        trace!(?body, "request body");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.headers())
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(ref token) = self.token {
            let auth_value = format!("Bearer {}", token);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value).expect("invalid token characters"),
            );
        }
        headers
    }

    /// Handle an RPC response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "store RPC response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(map_reqwest)?;
            Ok(body)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Store(error))
        }
    }

    /// Parse a service error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();

        // Try to parse as the service's error envelope
        match response.json::<ApiErrorResponse>().await {
            Ok(body) => StoreError::new(status, body.error.status, body.error.message),
            Err(_) => StoreError::new(status, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let url = StoreUrl::new("https://datastore.googleapis.com").unwrap();
        let client = DatastoreClient::new(url.clone(), "bookshelf-dev");
        assert_eq!(client.url().as_str(), url.as_str());
        assert_eq!(client.project_id(), "bookshelf-dev");
    }
}
