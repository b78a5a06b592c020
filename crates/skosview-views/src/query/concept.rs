//! `/{vocid}/data` executor: one row describing one concept.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use skosview_core::{Concept, ConceptRequest, RdfGraph, SkosmosApi};

use super::{finish, BuiltQuery, QueryBase, SkosmosQuery, VOCID_REQUIRED};
use crate::context::ExecutionContext;
use crate::pager::Pager;
use crate::rows::{ResultRow, ViewExecution};
use crate::translator::{FromPositional, CONCEPT_TEMPLATE};

pub struct ConceptQuery {
    base: QueryBase,
}

impl ConceptQuery {
    pub fn new(api: Arc<dyn SkosmosApi>, ctx: ExecutionContext) -> Self {
        Self {
            base: QueryBase::new(api, ctx),
        }
    }

    async fn fetch(&self, req: &ConceptRequest) -> RdfGraph {
        match self.base.api().get_concept(req).await {
            Ok(graph) => graph,
            Err(e) => {
                warn!(subsystem = "views", op = "concept", vocid = %req.vocid, error = %e, "Concept lookup failed");
                RdfGraph::default()
            }
        }
    }
}

pub(crate) fn concept_row(index: usize, concept: Concept) -> ResultRow {
    ResultRow::new(index)
        .with("uri", &concept.uri)
        .with("created", concept.created.map(|t| t.timestamp()))
        .with("modified", concept.modified.map(|t| t.timestamp()))
        .with("pref_label", &concept.pref_label)
        .with("alt_label", &concept.alt_labels)
        .with("definition", &concept.definition)
        .with("definition_source", &concept.definition_source)
        .with("scheme", &concept.scheme)
        .with("broader", &concept.broader)
        .with("narrower", &concept.narrower)
        .with("related", &concept.related)
        .with("broad_match", &concept.broad_match)
        .with("narrow_match", &concept.narrow_match)
        .with("related_match", &concept.related_match)
        .with("close_match", &concept.close_match)
        .with("exact_match", &concept.exact_match)
}

#[async_trait]
impl SkosmosQuery for ConceptQuery {
    fn base(&self) -> &QueryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut QueryBase {
        &mut self.base
    }

    fn build(&self, _pager: Option<&Pager>) -> BuiltQuery {
        BuiltQuery::new(self.base.translate(&CONCEPT_TEMPLATE))
    }

    async fn execute(&self, built: BuiltQuery, _pager: Option<&mut Pager>) -> ViewExecution {
        let args = built.query;
        if args.is_blank("vocid") {
            self.base.configuration_error(VOCID_REQUIRED);
            return ViewExecution::empty();
        }
        if args.is_blank("uri") {
            return ViewExecution::empty();
        }

        let req = match ConceptRequest::from_arguments(args) {
            Ok(req) => req,
            Err(e) => {
                self.base.invalid_arguments("concept", &e);
                return ViewExecution::empty();
            }
        };

        let start = Instant::now();
        let graph = self.fetch(&req).await;
        let lang = req
            .lang
            .as_deref()
            .unwrap_or(self.base.context().interface_language.as_str());
        let uri = req.uri.as_deref().unwrap_or_default();

        let rows = match graph.concept(uri, Some(lang)) {
            Ok(concept) => vec![concept_row(0, concept)],
            Err(e) => {
                debug!(subsystem = "views", op = "concept", uri, error = %e, "No concept in response");
                Vec::new()
            }
        };
        finish(start, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSkosmosApi;
    use serde_json::json;
    use skosview_core::{ApiError, MessageKind};

    const CATS: &str = "http://www.yso.fi/onto/yso/p4";

    fn graph() -> RdfGraph {
        serde_json::from_value(json!({
            "graph": [
                {
                    "uri": CATS,
                    "type": "skos:Concept",
                    "prefLabel": [{"lang": "en", "value": "cats"}, {"lang": "fi", "value": "kissat"}],
                    "altLabel": {"lang": "en", "value": "house cats"},
                    "broader": {"uri": "http://www.yso.fi/onto/yso/p10"},
                    "dct:created": "2008-02-12",
                    "skos:inScheme": {"uri": "http://www.yso.fi/onto/yso/"}
                },
                {
                    "uri": "http://www.yso.fi/onto/yso/p10",
                    "prefLabel": [{"lang": "en", "value": "felines"}, {"lang": "fi", "value": "kissaeläimet"}]
                }
            ]
        }))
        .unwrap()
    }

    fn query(api: MockSkosmosApi) -> (ConceptQuery, std::sync::Arc<skosview_core::MessageLog>) {
        let (ctx, log) = ExecutionContext::with_log("en");
        (ConceptQuery::new(Arc::new(api), ctx), log)
    }

    #[tokio::test]
    async fn test_concept_row() {
        let api = MockSkosmosApi::new().with_concept(graph());
        let (mut q, log) = query(api.clone());
        q.add_where(None, "vocid", json!("yso"));
        q.add_where(None, "uri", json!(CATS));
        q.add_where(None, "lang", json!(["fi"]));

        let exec = q.run(None).await;
        assert_eq!(exec.total_rows, 1);
        let row = &exec.result[0];
        assert_eq!(row.index, 0);
        assert_eq!(row.get_str("pref_label"), Some("kissat"));
        assert_eq!(
            row.get("broader"),
            Some(&json!([{"uri": "http://www.yso.fi/onto/yso/p10", "label": "kissaeläimet"}]))
        );
        assert_eq!(row.get("created"), Some(&json!(1202774400)));
        assert_eq!(row.get("modified"), Some(&serde_json::Value::Null));
        assert_eq!(row.get("scheme"), Some(&json!(["http://www.yso.fi/onto/yso/"])));
        assert!(log.is_empty());

        let calls = api.calls_to("get_concept");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].input["vocid"], json!("yso"));
        assert_eq!(calls[0].input["lang"], json!("fi"));
    }

    #[tokio::test]
    async fn test_missing_vocid_is_configuration_error() {
        let api = MockSkosmosApi::new();
        let (mut q, log) = query(api.clone());
        q.add_where(None, "uri", json!(CATS));

        let exec = q.run(None).await;
        assert!(exec.is_empty());
        assert!(api.calls().is_empty());
        assert_eq!(log.of_kind(MessageKind::Configuration), vec![VOCID_REQUIRED]);
    }

    #[tokio::test]
    async fn test_missing_uri_is_silent() {
        let api = MockSkosmosApi::new();
        let (mut q, log) = query(api.clone());
        q.add_where(None, "vocid", json!("yso"));

        assert!(q.run(None).await.is_empty());
        assert!(api.calls().is_empty());
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_recovers_silently() {
        let api = MockSkosmosApi::new().with_failure("get_concept", ApiError::new(Some(500), "boom"));
        let (mut q, log) = query(api);
        q.add_where(None, "vocid", json!("yso"));
        q.add_where(None, "uri", json!(CATS));

        let exec = q.run(None).await;
        assert!(exec.is_empty());
        assert_eq!(exec.total_rows, 0);
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_concept_absent_from_graph() {
        let api = MockSkosmosApi::new().with_concept(graph());
        let (mut q, _log) = query(api);
        q.add_where(None, "vocid", json!("yso"));
        q.add_where(None, "uri", json!("http://www.yso.fi/onto/yso/p999"));
        assert!(q.run(None).await.is_empty());
    }
}
