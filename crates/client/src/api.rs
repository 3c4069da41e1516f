//! HTTP access to the location endpoints.
//!
//! Controllers depend on the [`LocationsApi`] trait; [`HttpLocationsApi`]
//! is the [`reqwest`] implementation used against a running server.

use archmap_core::enrichment::EnrichedSite;
use archmap_core::taxonomy::{Category, Era};
use archmap_core::tour::Tour;
use async_trait::async_trait;

use crate::error::ClientError;

/// Query parameters of the site list request. At most one era and one
/// category are sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationQuery {
    pub era: Option<Era>,
    pub category: Option<Category>,
}

impl LocationQuery {
    /// `(name, value)` pairs for the URL query string.
    pub fn to_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(era) = self.era {
            pairs.push(("era", era.name()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.name()));
        }
        pairs
    }
}

/// Read access to sites and tours.
#[async_trait]
pub trait LocationsApi: Send + Sync {
    /// List sites as raw JSON. Entries are normalised by the caller so one
    /// malformed record does not fail the whole list.
    async fn list_locations(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<serde_json::Value>, ClientError>;

    async fn get_location(&self, id: &str) -> Result<EnrichedSite, ClientError>;

    async fn get_panorama(&self, id: &str) -> Result<Tour, ClientError>;
}

/// [`LocationsApi`] over HTTP.
pub struct HttpLocationsApi {
    client: reqwest::Client,
    api_url: String,
}

impl HttpLocationsApi {
    /// * `api_url` - Base URL including the `/api` prefix, e.g.
    ///   `http://localhost:3000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl LocationsApi for HttpLocationsApi {
    async fn list_locations(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let response = self
            .client
            .get(format!("{}/locations", self.api_url))
            .query(&query.to_pairs())
            .send()
            .await?;

        let body: serde_json::Value = Self::parse_response(response).await?;
        match body {
            serde_json::Value::Array(items) => Ok(items),
            _ => Err(ClientError::InvalidFormat("Invalid data format".into())),
        }
    }

    async fn get_location(&self, id: &str) -> Result<EnrichedSite, ClientError> {
        let response = self
            .client
            .get(format!("{}/locations/{}", self.api_url, id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn get_panorama(&self, id: &str) -> Result<Tour, ClientError> {
        let response = self
            .client
            .get(format!("{}/locations/{}/panorama", self.api_url, id))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
