/// End-to-end breadcrumb scenarios: raw broaderTransitive JSON, as the API
/// returns it, through indexing to root-first trails.
use serde_json::json;
use skosview_core::{build_trails, BroaderTransitiveResult, ConceptRef, EdgeIndex};

fn index_from(value: serde_json::Value) -> EdgeIndex {
    let result: BroaderTransitiveResult =
        serde_json::from_value(value).expect("valid broaderTransitive payload");
    EdgeIndex::new(result.broader_transitive)
}

#[test]
fn test_single_parent_scenario() {
    let index = index_from(json!({
        "uri": "X",
        "broaderTransitive": {
            "X": {"uri": "X", "prefLabel": "X", "broader": ["Y"]},
            "Y": {"uri": "Y", "prefLabel": "Y"}
        }
    }));

    let trails = build_trails(&index, "X");
    assert_eq!(
        trails,
        vec![vec![ConceptRef::new("Y", "Y"), ConceptRef::new("X", "X")]]
    );
}

#[test]
fn test_multi_parent_scenario() {
    let index = index_from(json!({
        "uri": "X",
        "broaderTransitive": {
            "X": {"uri": "X", "prefLabel": "X", "broader": ["Y", "Z"]},
            "Y": {"uri": "Y", "prefLabel": "Y", "broader": []},
            "Z": {"uri": "Z", "prefLabel": "Z", "broader": []}
        }
    }));

    let trails = build_trails(&index, "X");
    assert_eq!(trails.len(), 2, "one trail per parent");
    assert_eq!(trails[0], vec![ConceptRef::new("Y", "Y"), ConceptRef::new("X", "X")]);
    assert_eq!(trails[1], vec![ConceptRef::new("Z", "Z"), ConceptRef::new("X", "X")]);
}

#[test]
fn test_realistic_yso_hierarchy() {
    // cats -> {felines, pets}; felines -> mammals -> vertebrates; pets is a top concept
    let index = index_from(json!({
        "uri": "http://www.yso.fi/onto/yso/p4",
        "broaderTransitive": {
            "http://www.yso.fi/onto/yso/p4": {
                "uri": "http://www.yso.fi/onto/yso/p4",
                "prefLabel": "cats",
                "broader": ["http://www.yso.fi/onto/yso/p10", "http://www.yso.fi/onto/yso/p20"]
            },
            "http://www.yso.fi/onto/yso/p10": {
                "uri": "http://www.yso.fi/onto/yso/p10",
                "prefLabel": "felines",
                "broader": ["http://www.yso.fi/onto/yso/p11"]
            },
            "http://www.yso.fi/onto/yso/p11": {
                "uri": "http://www.yso.fi/onto/yso/p11",
                "prefLabel": "mammals",
                "broader": ["http://www.yso.fi/onto/yso/p12"]
            },
            "http://www.yso.fi/onto/yso/p12": {
                "uri": "http://www.yso.fi/onto/yso/p12",
                "prefLabel": "vertebrates",
                "top": "http://www.yso.fi/onto/yso/"
            },
            "http://www.yso.fi/onto/yso/p20": {
                "uri": "http://www.yso.fi/onto/yso/p20",
                "prefLabel": "pets"
            }
        }
    }));

    let trails = build_trails(&index, "http://www.yso.fi/onto/yso/p4");
    let labels: Vec<Vec<&str>> = trails
        .iter()
        .map(|t| t.iter().map(|c| c.label.as_str()).collect())
        .collect();
    assert_eq!(
        labels,
        vec![
            vec!["vertebrates", "mammals", "felines", "cats"],
            vec!["pets", "cats"],
        ]
    );
}

#[test]
fn test_cyclic_vocabulary_terminates() {
    let index = index_from(json!({
        "broaderTransitive": {
            "A": {"uri": "A", "prefLabel": "A", "broader": ["B"]},
            "B": {"uri": "B", "prefLabel": "B", "broader": ["A"]}
        }
    }));

    let trails = build_trails(&index, "A");
    assert!(trails.is_empty());
}

#[test]
fn test_empty_response_yields_one_empty_trail() {
    let index = index_from(json!({}));
    assert_eq!(build_trails(&index, "X"), vec![Vec::<ConceptRef>::new()]);
}
