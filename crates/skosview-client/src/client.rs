//! reqwest implementation of the Skosmos REST gateway.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use skosview_core::defaults::SLOW_REQUEST_MS;
use skosview_core::{
    ApiError, BroaderTransitiveRequest, BroaderTransitiveResult, ConceptRequest, Error,
    LabelResult, RdfGraph, Result, SearchRequest, SearchResults, SkosmosApi, VocabulariesRequest,
    VocabularyList,
};

use crate::config::ClientConfig;

/// HTTP client for one Skosmos host.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct SkosmosClient {
    client: Client,
    base_uri: String,
}

impl std::fmt::Debug for SkosmosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkosmosClient")
            .field("base_uri", &self.base_uri)
            .finish()
    }
}

/// Build the shared reqwest client for a configuration.
pub(crate) fn http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}

impl SkosmosClient {
    /// Create a client from configuration. Fails when the base URI is unset.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_uri = config.base_uri()?;
        let client = http_client(config)?;
        Ok(Self::with_http_client(client, base_uri))
    }

    /// Wrap an existing reqwest client.
    pub fn with_http_client(client: Client, base_uri: impl Into<String>) -> Self {
        let base_uri = base_uri.into().trim_end_matches('/').to_string();
        debug!(subsystem = "client", uri = %base_uri, "Initializing Skosmos client");
        Self { client, base_uri }
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(&config)
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_uri, path.trim_start_matches('/'))
    }

    /// One GET round trip, decoded as JSON.
    ///
    /// The data endpoints negotiate RDF serializations and fall back to
    /// RDF/XML, so callers name the media type they can decode.
    async fn get_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
        query: &[(&'static str, String)],
        accept: &'static str,
    ) -> Result<T> {
        let start = Instant::now();
        let url = self.endpoint(path);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, accept)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(subsystem = "client", op, url = %url, error = %e, "Skosmos request failed");
                ApiError::new(e.status().map(|s| s.as_u16()), format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                subsystem = "client",
                op,
                url = %url,
                status = status.as_u16(),
                "Skosmos returned an error status"
            );
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{}: {}", status, body.trim())
            };
            return Err(ApiError::new(Some(status.as_u16()), message).into());
        }

        let parsed = response.json::<T>().await.map_err(|e| {
            warn!(subsystem = "client", op, url = %url, error = %e, "Failed to decode Skosmos response");
            ApiError::new(
                Some(status.as_u16()),
                format!("Failed to parse response: {}", e),
            )
        })?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(subsystem = "client", op, duration_ms = elapsed, "Skosmos request complete");
        if elapsed > SLOW_REQUEST_MS {
            warn!(subsystem = "client", op, duration_ms = elapsed, slow = true, "Slow Skosmos request");
        }
        Ok(parsed)
    }
}

const JSON: &str = "application/json";
const JSON_LD: &str = "application/ld+json";

fn vocab_path(vocid: &str, endpoint: &str) -> String {
    format!("{}/{}", vocid.trim_matches('/'), endpoint)
}

#[async_trait]
impl SkosmosApi for SkosmosClient {
    #[instrument(skip(self, req), fields(vocid = %req.vocid))]
    async fn get_concept(&self, req: &ConceptRequest) -> Result<RdfGraph> {
        self.get_json(
            "get_concept",
            &vocab_path(&req.vocid, "data"),
            &req.query_pairs(),
            JSON_LD,
        )
        .await
    }

    #[instrument(skip(self, req), fields(vocid = %req.vocid, uri = %req.uri))]
    async fn get_broader_transitive(
        &self,
        req: &BroaderTransitiveRequest,
    ) -> Result<BroaderTransitiveResult> {
        self.get_json(
            "get_broader_transitive",
            &vocab_path(&req.vocid, "broaderTransitive"),
            &req.query_pairs(),
            JSON,
        )
        .await
    }

    #[instrument(skip(self, req), fields(query = %req.query))]
    async fn search(&self, req: &SearchRequest) -> Result<SearchResults> {
        self.get_json("search", "search", &req.query_pairs(), JSON)
            .await
    }

    #[instrument(skip(self, req), fields(lang = %req.lang))]
    async fn list_vocabularies(&self, req: &VocabulariesRequest) -> Result<VocabularyList> {
        self.get_json(
            "list_vocabularies",
            "vocabularies",
            &[("lang", req.lang.clone())],
            JSON,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_label(&self, uri: &str, lang: &str) -> Result<LabelResult> {
        self.get_json(
            "get_label",
            "label",
            &[("uri", uri.to_string()), ("lang", lang.to_string())],
            JSON,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_data(&self, uri: &str) -> Result<RdfGraph> {
        self.get_json("get_data", "data", &[("uri", uri.to_string())], JSON_LD)
            .await
    }
}
