//! HTTP-level tests for the Skosmos client against a mock server.
//!
//! Each test mounts the exact path and query parameters the client is
//! expected to send, so a wrong endpoint or a missing parameter fails the
//! `expect(1)` verification when the server drops.

use skosview_client::{ClientConfig, SkosmosClient};
use skosview_core::{
    BroaderTransitiveRequest, ConceptRequest, Error, SearchRequest, SkosmosApi,
    VocabulariesRequest,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SkosmosClient {
    let config = ClientConfig::default().with_base_uri(server.uri());
    SkosmosClient::new(&config).expect("Failed to create client")
}

#[tokio::test]
async fn test_broader_transitive_request_and_decoding() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "uri": "http://www.yso.fi/onto/yso/p4",
        "broaderTransitive": {
            "http://www.yso.fi/onto/yso/p4": {
                "uri": "http://www.yso.fi/onto/yso/p4",
                "prefLabel": "cats",
                "broader": ["http://www.yso.fi/onto/yso/p10"]
            },
            "http://www.yso.fi/onto/yso/p10": {
                "uri": "http://www.yso.fi/onto/yso/p10",
                "prefLabel": "felines"
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/yso/broaderTransitive"))
        .and(query_param("uri", "http://www.yso.fi/onto/yso/p4"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .get_broader_transitive(&BroaderTransitiveRequest {
            vocid: "yso".to_string(),
            uri: "http://www.yso.fi/onto/yso/p4".to_string(),
            lang: Some("en".to_string()),
        })
        .await
        .expect("request should succeed");

    assert_eq!(result.broader_transitive.len(), 2);
    let cats = result
        .broader_transitive
        .iter()
        .find(|e| e.label == "cats")
        .expect("cats edge");
    assert_eq!(
        cats.direct_broader_uris,
        vec!["http://www.yso.fi/onto/yso/p10".to_string()]
    );
}

#[tokio::test]
async fn test_concept_data_request() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "@context": {"skos": "http://www.w3.org/2004/02/skos/core#"},
        "graph": [{
            "uri": "http://www.yso.fi/onto/yso/p4",
            "type": "skos:Concept",
            "prefLabel": {"lang": "en", "value": "cats"}
        }]
    });

    Mock::given(method("GET"))
        .and(path("/yso/data"))
        .and(query_param("uri", "http://www.yso.fi/onto/yso/p4"))
        .and(query_param("format", "application/ld+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let graph = client
        .get_concept(&ConceptRequest {
            vocid: "yso".to_string(),
            format: Some("application/ld+json".to_string()),
            uri: Some("http://www.yso.fi/onto/yso/p4".to_string()),
            lang: None,
        })
        .await
        .expect("request should succeed");

    let concept = graph
        .concept("http://www.yso.fi/onto/yso/p4", Some("en"))
        .expect("concept present");
    assert_eq!(concept.pref_label.as_deref(), Some("cats"));
}

/// Serve JSON-LD only when asked for it; anything else gets Skosmos'
/// default RDF/XML serialization.
async fn mount_negotiated(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("accept", "application/ld+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(server)
        .await;

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
async fn test_concept_data_without_format_requests_json_ld() {
    let mock_server = MockServer::start().await;
    mount_negotiated(
        &mock_server,
        "/yso/data",
        serde_json::json!({
            "graph": [{
                "uri": "http://www.yso.fi/onto/yso/p4",
                "type": "skos:Concept",
                "prefLabel": {"lang": "en", "value": "cats"}
            }]
        }),
    )
    .await;

    let client = client_for(&mock_server);
    let graph = client
        .get_concept(&ConceptRequest {
            vocid: "yso".to_string(),
            format: None,
            uri: Some("http://www.yso.fi/onto/yso/p4".to_string()),
            lang: None,
        })
        .await
        .expect("JSON-LD should be negotiated");

    let concept = graph
        .concept("http://www.yso.fi/onto/yso/p4", Some("en"))
        .expect("concept present");
    assert_eq!(concept.pref_label.as_deref(), Some("cats"));
}

#[tokio::test]
async fn test_global_data_lookup_requests_json_ld() {
    let mock_server = MockServer::start().await;
    mount_negotiated(
        &mock_server,
        "/data",
        serde_json::json!({
            "graph": [{"uri": "http://www.yso.fi/onto/yso/p4", "type": "skos:Concept"}]
        }),
    )
    .await;

    let client = client_for(&mock_server);
    client
        .get_data("http://www.yso.fi/onto/yso/p4")
        .await
        .expect("JSON-LD should be negotiated");
}

#[tokio::test]
async fn test_search_sends_positional_parameters_by_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "cat*"))
        .and(query_param("lang", "en"))
        .and(query_param("vocab", "yso"))
        .and(query_param("maxhits", "5"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"uri": "http://www.yso.fi/onto/yso/p4", "type": ["skos:Concept"], "prefLabel": "cats", "lang": "en", "vocab": "yso"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results = client
        .search(&SearchRequest {
            query: "cat*".to_string(),
            lang: Some("en".to_string()),
            vocab: Some("yso".to_string()),
            maxhits: Some(5),
            offset: Some(10),
            ..Default::default()
        })
        .await
        .expect("request should succeed");

    assert_eq!(results.results.len(), 1);
    assert_eq!(results.results[0].vocab.as_deref(), Some("yso"));
}

#[tokio::test]
async fn test_vocabularies_and_label() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vocabularies"))
        .and(query_param("lang", "fi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "vocabularies": [
                {"uri": "http://www.yso.fi/onto/yso/", "id": "yso", "title": "YSO - Yleinen suomalainen ontologia"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/label"))
        .and(query_param("uri", "http://www.yso.fi/onto/yso/p4"))
        .and(query_param("lang", "fi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uri": "http://www.yso.fi/onto/yso/p4",
            "prefLabel": "kissat"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let list = client
        .list_vocabularies(&VocabulariesRequest {
            lang: "fi".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(list.vocabularies[0].id, "yso");

    let label = client
        .get_label("http://www.yso.fi/onto/yso/p4", "fi")
        .await
        .unwrap();
    assert_eq!(label.pref_label.as_deref(), Some("kissat"));
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(400).set_body_string("query parameter missing"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .search(&SearchRequest::default())
        .await
        .expect_err("400 must fail");

    let api = err.as_api().expect("API error");
    assert_eq!(api.status, Some(400));
    assert!(api.message.contains("query parameter missing"));
}

#[tokio::test]
async fn test_malformed_payload_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vocabularies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .list_vocabularies(&VocabulariesRequest {
            lang: "en".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, Some(200));
            assert!(api.message.starts_with("Failed to parse response"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_data_lookup_for_missing_uri_is_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("uri", "http://example.org/nothing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.get_data("http://example.org/nothing").await.unwrap_err();
    assert_eq!(err.as_api().and_then(|e| e.status), Some(404));
}

#[tokio::test]
async fn test_unreachable_host_has_no_status() {
    // Port 9 (discard) on localhost is closed in test environments.
    let config = ClientConfig::default()
        .with_base_uri("http://127.0.0.1:9")
        .with_timeout_secs(2);
    let client = SkosmosClient::new(&config).unwrap();

    let err = client.get_data("http://example.org/x").await.unwrap_err();
    let api = err.as_api().expect("API error");
    assert_eq!(api.status, None);
}
