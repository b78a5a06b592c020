//! Listings executed against a mock Skosmos server through the real client,
//! with the host resolved from configuration the way a view initializes.

use std::sync::Arc;

use serde_json::json;
use skosview_client::{ClientConfig, ClientFactory};
use skosview_core::{InMemoryHostStore, MessageKind, SkosmosApi, SkosmosHost, ViewBinding};
use skosview_views::{
    BreadcrumbQuery, ConceptQuery, ConceptUriValidator, ExecutionContext, LabelListField, Pager,
    SearchQuery, SkosmosQuery,
};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn gateway_for(server: &MockServer) -> Arc<dyn SkosmosApi> {
    let store = InMemoryHostStore::with_hosts([SkosmosHost::new("finto", "Finto", server.uri())])
        .expect("valid host");
    let mut factory = ClientFactory::new(&ClientConfig::default()).expect("factory");
    factory
        .set_host_from_view(&ViewBinding::new("finto"), &store)
        .expect("host resolves");
    factory.gateway().expect("gateway")
}

#[tokio::test]
async fn test_breadcrumb_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/yso/broaderTransitive"))
        .and(query_param("uri", "http://www.yso.fi/onto/yso/p4"))
        .and(query_param("lang", "fi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uri": "http://www.yso.fi/onto/yso/p4",
            "broaderTransitive": {
                "http://www.yso.fi/onto/yso/p4": {
                    "uri": "http://www.yso.fi/onto/yso/p4",
                    "prefLabel": "kissat",
                    "broader": ["http://www.yso.fi/onto/yso/p10", "http://www.yso.fi/onto/yso/p20"]
                },
                "http://www.yso.fi/onto/yso/p10": {
                    "uri": "http://www.yso.fi/onto/yso/p10",
                    "prefLabel": "kissaeläimet"
                },
                "http://www.yso.fi/onto/yso/p20": {
                    "uri": "http://www.yso.fi/onto/yso/p20",
                    "prefLabel": "lemmikit"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, log) = ExecutionContext::with_log("fi");
    let mut query = BreadcrumbQuery::new(gateway_for(&server).await, ctx);
    query.add_where(None, "vocid", json!("yso"));
    query.add_where(None, "uri", json!("http://www.yso.fi/onto/yso/p4"));
    query.add_where(None, "lang", json!(["***LANGUAGE_language_interface***"]));

    let execution = query.run(None).await;
    assert_eq!(execution.total_rows, 2);
    assert!(log.is_empty());

    let field = LabelListField::new("breadcrumbs")
        .with_link_to_uri(false)
        .with_display(skosview_views::ListDisplay::Separator {
            separator: " > ".to_string(),
        });
    let rendered: Vec<String> = execution.result.iter().map(|row| field.render(row)).collect();
    assert_eq!(
        rendered,
        vec!["kissaeläimet &gt; kissat", "lemmikit &gt; kissat"]
    );
}

/// Skosmos answers the data endpoints with RDF/XML unless JSON-LD is
/// requested.
async fn mount_rdf_xml_fallback(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rdf+xml")
                .set_body_string("<?xml version=\"1.0\"?><rdf:RDF/>"),
        )
        .with_priority(10)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_concept_listing_and_validation_negotiate_json_ld() {
    let server = MockServer::start().await;
    let graph = json!({
        "graph": [{
            "uri": "http://www.yso.fi/onto/yso/p4",
            "type": "skos:Concept",
            "prefLabel": {"lang": "en", "value": "cats"}
        }]
    });
    Mock::given(method("GET"))
        .and(path("/yso/data"))
        .and(query_param("uri", "http://www.yso.fi/onto/yso/p4"))
        .and(header("accept", "application/ld+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&graph))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("uri", "http://www.yso.fi/onto/yso/p4"))
        .and(header("accept", "application/ld+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&graph))
        .expect(1)
        .mount(&server)
        .await;
    mount_rdf_xml_fallback(&server, "/yso/data").await;
    mount_rdf_xml_fallback(&server, "/data").await;

    let gateway = gateway_for(&server).await;
    let (ctx, log) = ExecutionContext::with_log("en");
    let mut query = ConceptQuery::new(gateway.clone(), ctx);
    query.add_where(None, "vocid", json!("yso"));
    query.add_where(None, "uri", json!("http://www.yso.fi/onto/yso/p4"));

    let execution = query.run(None).await;
    assert_eq!(execution.result.len(), 1);
    assert_eq!(execution.result[0].get_str("pref_label"), Some("cats"));
    assert!(log.is_empty());

    let validator = ConceptUriValidator::new(gateway);
    assert!(validator.validate("http://www.yso.fi/onto/yso/p4").await);
}

#[tokio::test]
async fn test_paged_search_listing() {
    let server = MockServer::start().await;
    let hits: Vec<_> = (0..7)
        .map(|i| json!({"uri": format!("http://www.yso.fi/onto/yso/p{}", i), "prefLabel": format!("cat {}", i), "vocab": "yso", "lang": "en"}))
        .collect();

    // Count call: no pagination parameters.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "cat*"))
        .and(query_param_is_missing("maxhits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": hits})))
        .expect(1)
        .mount(&server)
        .await;

    // Data call for the second page.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "cat*"))
        .and(query_param("maxhits", "3"))
        .and(query_param("offset", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": hits[3..6]})))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, log) = ExecutionContext::with_log("en");
    let mut query = SearchQuery::new(gateway_for(&server).await, ctx);
    query.add_where(None, "query", json!("cat*"));
    let mut pager = Pager::new(3).with_current_page(1);

    let execution = query.run(Some(&mut pager)).await;
    assert_eq!(execution.total_rows, 7);
    assert_eq!(execution.result.len(), 3);
    assert_eq!(execution.result[0].index, 0);
    assert_eq!(execution.result[0].get_str("pref_label"), Some("cat 3"));
    assert_eq!(pager.total_pages, 3);
    assert!(pager.has_more());
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_search_error_reaches_runtime_channel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let (ctx, log) = ExecutionContext::with_log("en");
    let mut query = SearchQuery::new(gateway_for(&server).await, ctx);
    query.add_where(None, "query", json!("cat*"));

    let execution = query.run(None).await;
    assert!(execution.is_empty());
    let errors = log.of_kind(MessageKind::Runtime);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("internal error"));
}

#[tokio::test]
async fn test_missing_host_fails_fast() {
    let store = InMemoryHostStore::new();
    let mut factory = ClientFactory::new(&ClientConfig::default()).unwrap();
    let err = factory
        .set_host_from_view(&ViewBinding::new("finto"), &store)
        .unwrap_err();
    assert!(matches!(err, skosview_core::Error::Config(_)));
    assert!(factory.gateway().is_err());
}
