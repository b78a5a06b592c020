//! Core traits for skosview abstractions.
//!
//! [`SkosmosApi`] is the gateway seam: the HTTP client implements it, tests
//! substitute a recording mock. [`Messenger`] replaces the host framework's
//! global message service and is passed to executors explicitly.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{BroaderTransitiveResult, LabelResult, RdfGraph, SearchResults, VocabularyList};

// =============================================================================
// GATEWAY REQUESTS
// =============================================================================

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        pairs.push((key, v.clone()));
    }
}

fn push_list(pairs: &mut Vec<(&'static str, String)>, key: &'static str, values: &[String]) {
    if !values.is_empty() {
        pairs.push((key, values.join(" ")));
    }
}

/// Arguments of `/{vocid}/data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRequest {
    pub vocid: String,
    pub format: Option<String>,
    pub uri: Option<String>,
    pub lang: Option<String>,
}

impl ConceptRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "uri", &self.uri);
        push_opt(&mut pairs, "format", &self.format);
        push_opt(&mut pairs, "lang", &self.lang);
        pairs
    }
}

/// Arguments of `/{vocid}/broaderTransitive`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroaderTransitiveRequest {
    pub vocid: String,
    pub uri: String,
    pub lang: Option<String>,
}

impl BroaderTransitiveRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("uri", self.uri.clone())];
        push_opt(&mut pairs, "lang", &self.lang);
        pairs
    }
}

/// Arguments of `/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub lang: Option<String>,
    pub labellang: Option<String>,
    pub vocab: Option<String>,
    pub types: Vec<String>,
    pub parent: Option<String>,
    pub group: Option<String>,
    pub maxhits: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Vec<String>,
    pub unique: Option<bool>,
}

impl SearchRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("query", self.query.clone())];
        push_opt(&mut pairs, "lang", &self.lang);
        push_opt(&mut pairs, "labellang", &self.labellang);
        push_opt(&mut pairs, "vocab", &self.vocab);
        push_list(&mut pairs, "type", &self.types);
        push_opt(&mut pairs, "parent", &self.parent);
        push_opt(&mut pairs, "group", &self.group);
        if let Some(n) = self.maxhits {
            pairs.push(("maxhits", n.to_string()));
        }
        if let Some(n) = self.offset {
            pairs.push(("offset", n.to_string()));
        }
        push_list(&mut pairs, "fields", &self.fields);
        if let Some(u) = self.unique {
            pairs.push(("unique", u.to_string()));
        }
        pairs
    }
}

/// Arguments of `/vocabularies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabulariesRequest {
    pub lang: String,
}

// =============================================================================
// GATEWAY
// =============================================================================

/// Typed capability over the Skosmos REST API.
///
/// One round trip per call. Implementations never retry, never cache and
/// never swallow failures: every remote problem is returned as
/// [`crate::Error::Api`].
#[async_trait]
pub trait SkosmosApi: Send + Sync {
    /// `/{vocid}/data`: RDF graph describing a concept.
    async fn get_concept(&self, req: &ConceptRequest) -> Result<RdfGraph>;

    /// `/{vocid}/broaderTransitive`: every ancestor with its direct broaders.
    async fn get_broader_transitive(
        &self,
        req: &BroaderTransitiveRequest,
    ) -> Result<BroaderTransitiveResult>;

    /// `/search`: keyword search across one or all vocabularies.
    async fn search(&self, req: &SearchRequest) -> Result<SearchResults>;

    /// `/vocabularies`: vocabularies published by the host.
    async fn list_vocabularies(&self, req: &VocabulariesRequest) -> Result<VocabularyList>;

    /// `/label`: preferred label of any resource.
    async fn get_label(&self, uri: &str, lang: &str) -> Result<LabelResult>;

    /// `/data` without a vocabulary, used to check that a URI resolves.
    async fn get_data(&self, uri: &str) -> Result<RdfGraph>;
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Channel a user-visible message is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// The view is misconfigured (missing mandatory argument, unset host).
    Configuration,
    /// A remote call failed while rendering.
    Runtime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Sink for user-visible messages.
pub trait Messenger: Send + Sync {
    fn add(&self, kind: MessageKind, text: String);

    fn add_configuration_error(&self, text: &str) {
        self.add(MessageKind::Configuration, text.to_string());
    }

    fn add_error(&self, text: &str) {
        self.add(MessageKind::Runtime, text.to_string());
    }
}

/// Messenger that keeps every message for later display.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Mutex<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages posted so far.
    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn of_kind(&self, kind: MessageKind) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.text)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl Messenger for MessageLog {
    fn add(&self, kind: MessageKind, text: String) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(Message { kind, text });
        }
    }
}
