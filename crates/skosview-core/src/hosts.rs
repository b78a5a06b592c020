//! Skosmos host configuration records.
//!
//! A host record names one Skosmos REST endpoint. Views reference a host by
//! id and resolve its URI once, when the query is initialized; a missing
//! host or empty URI is a configuration error, raised before any request.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{Error, Result};

static MACHINE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid machine name pattern"));

/// Problems with a host record's fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostValidationError {
    #[error("Host id must contain only lowercase letters, digits and underscores, got: {0:?}")]
    InvalidId(String),

    #[error("Host label cannot be empty")]
    EmptyLabel,

    #[error("Host URI must be an absolute http(s) URL, got: {0:?}")]
    InvalidUri(String),
}

impl From<HostValidationError> for Error {
    fn from(e: HostValidationError) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

/// One configured Skosmos API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkosmosHost {
    pub id: String,
    pub label: String,
    /// Base URI of the REST API, e.g. `https://api.finto.fi/rest/v1`.
    #[serde(default)]
    pub uri: String,
}

impl SkosmosHost {
    pub fn new(id: impl Into<String>, label: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            uri: uri.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), HostValidationError> {
        if !MACHINE_NAME.is_match(&self.id) {
            return Err(HostValidationError::InvalidId(self.id.clone()));
        }
        if self.label.trim().is_empty() {
            return Err(HostValidationError::EmptyLabel);
        }
        match url::Url::parse(&self.uri) {
            Ok(u) if matches!(u.scheme(), "http" | "https") && u.has_host() => Ok(()),
            _ => Err(HostValidationError::InvalidUri(self.uri.clone())),
        }
    }

    /// The base URI, or a configuration error when it is blank.
    pub fn require_uri(&self) -> Result<&str> {
        if self.uri.trim().is_empty() {
            return Err(Error::Config(format!(
                "The Skosmos host '{}' has no API URI configured",
                self.id
            )));
        }
        Ok(&self.uri)
    }
}

/// CRUD storage for host records.
pub trait HostStore: Send + Sync {
    /// Insert a new record. Fails if the id is taken.
    fn create(&self, host: SkosmosHost) -> Result<()>;

    fn load(&self, id: &str) -> Result<Option<SkosmosHost>>;

    /// All records, sorted by label.
    fn list(&self) -> Result<Vec<SkosmosHost>>;

    /// Replace an existing record.
    fn update(&self, host: SkosmosHost) -> Result<()>;

    /// Remove a record. Returns whether it existed.
    fn delete(&self, id: &str) -> Result<bool>;
}

/// Process-local host store.
#[derive(Debug, Default)]
pub struct InMemoryHostStore {
    hosts: RwLock<HashMap<String, SkosmosHost>>,
}

impl InMemoryHostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with validated records.
    pub fn with_hosts(hosts: impl IntoIterator<Item = SkosmosHost>) -> Result<Self> {
        let store = Self::new();
        for host in hosts {
            store.create(host)?;
        }
        Ok(store)
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Config("host store lock poisoned".to_string())
}

impl HostStore for InMemoryHostStore {
    fn create(&self, host: SkosmosHost) -> Result<()> {
        host.validate()?;
        let mut hosts = self.hosts.write().map_err(poisoned)?;
        if hosts.contains_key(&host.id) {
            return Err(Error::InvalidInput(format!(
                "A Skosmos host with id '{}' already exists",
                host.id
            )));
        }
        info!(subsystem = "core", host_id = %host.id, uri = %host.uri, "Created Skosmos host");
        hosts.insert(host.id.clone(), host);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<SkosmosHost>> {
        let hosts = self.hosts.read().map_err(poisoned)?;
        Ok(hosts.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SkosmosHost>> {
        let hosts = self.hosts.read().map_err(poisoned)?;
        let mut all: Vec<SkosmosHost> = hosts.values().cloned().collect();
        all.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    fn update(&self, host: SkosmosHost) -> Result<()> {
        host.validate()?;
        let mut hosts = self.hosts.write().map_err(poisoned)?;
        match hosts.get_mut(&host.id) {
            Some(existing) => {
                info!(subsystem = "core", host_id = %host.id, uri = %host.uri, "Updated Skosmos host");
                *existing = host;
                Ok(())
            }
            None => Err(Error::NotFound(format!("Skosmos host '{}'", host.id))),
        }
    }

    fn delete(&self, id: &str) -> Result<bool> {
        let mut hosts = self.hosts.write().map_err(poisoned)?;
        let removed = hosts.remove(id).is_some();
        if removed {
            info!(subsystem = "core", host_id = id, "Deleted Skosmos host");
        }
        Ok(removed)
    }
}

/// The host a view's base table is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewBinding {
    pub host_id: String,
}

impl ViewBinding {
    pub fn new(host_id: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
        }
    }

    /// Resolve the API base URI for this view.
    pub fn host_uri(&self, store: &dyn HostStore) -> Result<String> {
        let host = store.load(&self.host_id)?.ok_or_else(|| {
            Error::Config(format!(
                "The view references Skosmos host '{}', which does not exist",
                self.host_id
            ))
        })?;
        let uri = host.require_uri()?.to_string();
        debug!(subsystem = "core", host_id = %self.host_id, uri = %uri, "Resolved view host");
        Ok(uri)
    }
}
