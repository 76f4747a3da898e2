use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::controller::SearchRequest;
use crate::types::SearchPage;

/// Thin HTTP client for the search endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
    #[error("ResponseError: {0}")]
    Response(String),
    #[error("{0}")]
    Api(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
}

/// Error body shape shared by all API endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Execute one controller-issued request and return the parsed page.
    ///
    /// Non-2xx responses come back as [`ClientError::Api`] carrying the
    /// server's error text, so callers can surface it directly.
    pub async fn fetch(&self, request: &SearchRequest) -> Result<SearchPage, ClientError> {
        let url = self.endpoint(request.endpoint)?;

        let response = self
            .client
            .get(url)
            .query(&request.params)
            .send()
            .await
            .map_err(|e| ClientError::Response(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("search request failed with status {status}"));
            return Err(ClientError::Api(message));
        }

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| ClientError::Parsing(format!("Failed to parse response as JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_tolerated() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        let url = client.endpoint("/search/insights").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/search/insights");
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
