//! Per-host client construction.
//!
//! One factory lives for the whole process and owns the shared reqwest
//! client; each view execution points it at its host and takes a gateway.

use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use skosview_core::{Error, HostStore, Result, SkosmosApi, ViewBinding};

use crate::client::{http_client, SkosmosClient};
use crate::config::ClientConfig;

/// Builds [`SkosmosClient`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct ClientFactory {
    http: Client,
    uri: Option<String>,
}

impl ClientFactory {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http: http_client(config)?,
            uri: config.base_uri.clone().filter(|u| !u.trim().is_empty()),
        })
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        let uri = uri.into();
        info!(subsystem = "client", uri = %uri, "Skosmos client factory host changed");
        self.uri = Some(uri);
        self
    }

    /// Point the factory at the host a view is bound to.
    pub fn set_host_from_view(
        &mut self,
        binding: &ViewBinding,
        store: &dyn HostStore,
    ) -> Result<&mut Self> {
        let uri = binding.host_uri(store)?;
        Ok(self.set_uri(uri))
    }

    /// A client for the current host.
    pub fn client(&self) -> Result<SkosmosClient> {
        let uri = self
            .uri
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "The base URI of the Skosmos API has not been set in the client factory"
                        .to_string(),
                )
            })?;
        Ok(SkosmosClient::with_http_client(self.http.clone(), uri))
    }

    /// The current client as a shareable gateway.
    pub fn gateway(&self) -> Result<Arc<dyn SkosmosApi>> {
        Ok(Arc::new(self.client()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skosview_core::{InMemoryHostStore, SkosmosHost};

    #[test]
    fn test_client_without_uri_fails_fast() {
        let factory = ClientFactory::new(&ClientConfig::default()).unwrap();
        assert!(matches!(factory.client(), Err(Error::Config(_))));
        assert!(factory.gateway().is_err());
    }

    #[test]
    fn test_set_uri_then_client() {
        let mut factory = ClientFactory::new(&ClientConfig::default()).unwrap();
        factory.set_uri("https://api.finto.fi/rest/v1");
        let client = factory.client().unwrap();
        assert_eq!(client.base_uri(), "https://api.finto.fi/rest/v1");
    }

    #[test]
    fn test_set_host_from_view() {
        let store = InMemoryHostStore::with_hosts(vec![SkosmosHost::new(
            "finto",
            "Finto",
            "https://api.finto.fi/rest/v1",
        )])
        .unwrap();
        let mut factory = ClientFactory::new(&ClientConfig::default()).unwrap();
        factory
            .set_host_from_view(&ViewBinding::new("finto"), &store)
            .unwrap();
        assert_eq!(factory.uri(), Some("https://api.finto.fi/rest/v1"));
    }

    #[test]
    fn test_set_host_from_view_unknown_host() {
        let store = InMemoryHostStore::new();
        let mut factory = ClientFactory::new(&ClientConfig::default()).unwrap();
        let err = factory
            .set_host_from_view(&ViewBinding::new("missing"), &store)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(factory.uri().is_none());
    }
}
