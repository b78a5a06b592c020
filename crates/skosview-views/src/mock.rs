//! Recording mock gateway for deterministic executor tests.
//!
//! ```rust
//! use skosview_views::mock::MockSkosmosApi;
//! use skosview_core::{SearchResults, VocabularyList};
//!
//! let api = MockSkosmosApi::new()
//!     .with_search(SearchResults::default())
//!     .with_vocabularies(VocabularyList::default());
//! assert!(api.calls().is_empty());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;

use skosview_core::{
    ApiError, BroaderTransitiveRequest, BroaderTransitiveResult, ConceptRequest, Error,
    LabelResult, RdfGraph, Result, SearchRequest, SearchResults, SkosmosApi, VocabulariesRequest,
    VocabularyList,
};

/// Mock gateway. Unconfigured operations return the empty typed result.
#[derive(Clone, Default)]
pub struct MockSkosmosApi {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    concept: RdfGraph,
    broader_transitive: BroaderTransitiveResult,
    search: SearchResults,
    vocabularies: VocabularyList,
    labels: HashMap<String, LabelResult>,
    data: HashMap<String, RdfGraph>,
    failures: HashMap<&'static str, ApiError>,
}

/// One recorded gateway call with its serialized arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub operation: &'static str,
    pub input: serde_json::Value,
}

impl MockSkosmosApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concept(mut self, graph: RdfGraph) -> Self {
        Arc::make_mut(&mut self.config).concept = graph;
        self
    }

    pub fn with_broader_transitive(mut self, result: BroaderTransitiveResult) -> Self {
        Arc::make_mut(&mut self.config).broader_transitive = result;
        self
    }

    pub fn with_search(mut self, results: SearchResults) -> Self {
        Arc::make_mut(&mut self.config).search = results;
        self
    }

    pub fn with_vocabularies(mut self, list: VocabularyList) -> Self {
        Arc::make_mut(&mut self.config).vocabularies = list;
        self
    }

    pub fn with_label(mut self, uri: &str, label: &str) -> Self {
        Arc::make_mut(&mut self.config).labels.insert(
            uri.to_string(),
            LabelResult {
                uri: Some(uri.to_string()),
                pref_label: Some(label.to_string()),
            },
        );
        self
    }

    /// Make `get_data(uri)` resolve; other URIs fail with 404.
    pub fn with_data(mut self, uri: &str, graph: RdfGraph) -> Self {
        Arc::make_mut(&mut self.config)
            .data
            .insert(uri.to_string(), graph);
        self
    }

    /// Fail every call of `operation` (e.g. `"search"`) with `error`.
    pub fn with_failure(mut self, operation: &'static str, error: ApiError) -> Self {
        Arc::make_mut(&mut self.config)
            .failures
            .insert(operation, error);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<MockCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .collect()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut log) = self.call_log.lock() {
            log.clear();
        }
    }

    fn record<T: Serialize>(&self, operation: &'static str, input: &T) -> Result<()> {
        if let Ok(mut log) = self.call_log.lock() {
            log.push(MockCall {
                operation,
                input: serde_json::to_value(input).unwrap_or_default(),
            });
        }
        match self.config.failures.get(operation) {
            Some(err) => Err(Error::Api(err.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SkosmosApi for MockSkosmosApi {
    async fn get_concept(&self, req: &ConceptRequest) -> Result<RdfGraph> {
        self.record("get_concept", req)?;
        Ok(self.config.concept.clone())
    }

    async fn get_broader_transitive(
        &self,
        req: &BroaderTransitiveRequest,
    ) -> Result<BroaderTransitiveResult> {
        self.record("get_broader_transitive", req)?;
        Ok(self.config.broader_transitive.clone())
    }

    async fn search(&self, req: &SearchRequest) -> Result<SearchResults> {
        self.record("search", req)?;
        let mut results = self.config.search.results.clone();
        let offset = req.offset.unwrap_or(0) as usize;
        results = results.into_iter().skip(offset).collect();
        if let Some(max) = req.maxhits {
            results.truncate(max as usize);
        }
        Ok(SearchResults { results })
    }

    async fn list_vocabularies(&self, req: &VocabulariesRequest) -> Result<VocabularyList> {
        self.record("list_vocabularies", req)?;
        Ok(self.config.vocabularies.clone())
    }

    async fn get_label(&self, uri: &str, lang: &str) -> Result<LabelResult> {
        self.record("get_label", &(uri, lang))?;
        self.config
            .labels
            .get(uri)
            .cloned()
            .ok_or_else(|| ApiError::new(Some(404), format!("404 Not Found: {}", uri)).into())
    }

    async fn get_data(&self, uri: &str) -> Result<RdfGraph> {
        self.record("get_data", &uri)?;
        self.config
            .data
            .get(uri)
            .cloned()
            .ok_or_else(|| ApiError::new(Some(404), format!("404 Not Found: {}", uri)).into())
    }
}
