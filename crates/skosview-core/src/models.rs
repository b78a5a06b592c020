//! Data models for Skosmos API responses and the values built from them.
//!
//! The response types deserialize the Skosmos REST JSON leniently: labels
//! may arrive as plain strings or `{lang, value}` objects, references as
//! plain URIs or `{uri, ...}` nodes, and multi-valued properties as a single
//! value or an array. Every response type implements `Default`, which is the
//! "empty result" executors fall back to when a call fails.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// CORE VALUES
// =============================================================================

/// A vocabulary concept and its display label in one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConceptRef {
    pub uri: String,
    pub label: String,
}

impl ConceptRef {
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
        }
    }
}

/// One concept returned by a broader-transitive query.
///
/// `direct_broader_uris` is empty for a top concept and may hold several
/// entries: the broader hierarchy is a DAG, not a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroaderEdge {
    pub uri: String,
    pub direct_broader_uris: Vec<String>,
    pub label: String,
}

impl BroaderEdge {
    pub fn new(uri: impl Into<String>, direct_broader_uris: Vec<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            direct_broader_uris,
            label: label.into(),
        }
    }

    /// Whether this concept has no broader concepts.
    pub fn is_root(&self) -> bool {
        self.direct_broader_uris.is_empty()
    }
}

/// Root-first path from a top concept down to the queried concept.
pub type BreadcrumbTrail = Vec<ConceptRef>;

// =============================================================================
// LENIENT JSON BUILDING BLOCKS
// =============================================================================

/// A literal as Skosmos serializes it: bare string or language-tagged object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Text(String),
    Tagged {
        #[serde(default)]
        lang: Option<String>,
        value: String,
    },
}

impl Literal {
    pub fn value(&self) -> &str {
        match self {
            Literal::Text(v) => v,
            Literal::Tagged { value, .. } => value,
        }
    }

    pub fn lang(&self) -> Option<&str> {
        match self {
            Literal::Text(_) => None,
            Literal::Tagged { lang, .. } => lang.as_deref(),
        }
    }
}

/// A resource reference: bare URI or a node object with a `uri` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Uri(String),
    Node { uri: String },
}

impl Reference {
    pub fn uri(&self) -> &str {
        match self {
            Reference::Uri(u) => u,
            Reference::Node { uri } => uri,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(v)) => vec![v],
        Some(OneOrMany::Many(v)) => v,
    })
}

/// Pick the literal matching `lang`, falling back to the first one.
fn pick_literal<'a>(literals: &'a [Literal], lang: Option<&str>) -> Option<&'a Literal> {
    lang.and_then(|l| literals.iter().find(|lit| lit.lang() == Some(l)))
        .or_else(|| literals.first())
}

fn literals_in<'a>(literals: &'a [Literal], lang: Option<&str>) -> Vec<String> {
    literals
        .iter()
        .filter(|lit| match (lang, lit.lang()) {
            (Some(wanted), Some(have)) => wanted == have,
            _ => true,
        })
        .map(|lit| lit.value().to_string())
        .collect()
}

/// Parse the date formats Skosmos emits for `dct:created`/`dct:modified`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// =============================================================================
// /{vocid}/data
// =============================================================================

/// One resource node of a JSON-LD concept graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GraphNode {
    pub uri: String,
    #[serde(default, rename = "type", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, rename = "prefLabel", alias = "skos:prefLabel", deserialize_with = "one_or_many")]
    pub pref_label: Vec<Literal>,
    #[serde(default, rename = "altLabel", alias = "skos:altLabel", deserialize_with = "one_or_many")]
    pub alt_label: Vec<Literal>,
    #[serde(default, rename = "skos:definition", alias = "definition", deserialize_with = "one_or_many")]
    pub definition: Vec<Literal>,
    #[serde(default, rename = "dc:source", alias = "dct:source", deserialize_with = "one_or_many")]
    pub definition_source: Vec<Literal>,
    #[serde(default, rename = "skos:inScheme", alias = "inScheme", deserialize_with = "one_or_many")]
    pub in_scheme: Vec<Reference>,
    #[serde(default, rename = "dct:created", alias = "created")]
    pub created: Option<Literal>,
    #[serde(default, rename = "dct:modified", alias = "modified")]
    pub modified: Option<Literal>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub broader: Vec<Reference>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub narrower: Vec<Reference>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub related: Vec<Reference>,
    #[serde(default, rename = "broadMatch", alias = "skos:broadMatch", deserialize_with = "one_or_many")]
    pub broad_match: Vec<Reference>,
    #[serde(default, rename = "narrowMatch", alias = "skos:narrowMatch", deserialize_with = "one_or_many")]
    pub narrow_match: Vec<Reference>,
    #[serde(default, rename = "relatedMatch", alias = "skos:relatedMatch", deserialize_with = "one_or_many")]
    pub related_match: Vec<Reference>,
    #[serde(default, rename = "closeMatch", alias = "skos:closeMatch", deserialize_with = "one_or_many")]
    pub close_match: Vec<Reference>,
    #[serde(default, rename = "exactMatch", alias = "skos:exactMatch", deserialize_with = "one_or_many")]
    pub exact_match: Vec<Reference>,
}

/// Response of `/{vocid}/data` in JSON-LD form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RdfGraph {
    #[serde(default)]
    pub graph: Vec<GraphNode>,
}

/// A concept extracted from an [`RdfGraph`], with related concepts labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Concept {
    pub uri: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub pref_label: Option<String>,
    pub alt_labels: Vec<String>,
    pub definition: Vec<String>,
    pub definition_source: Vec<String>,
    pub scheme: Vec<String>,
    pub broader: Vec<ConceptRef>,
    pub narrower: Vec<ConceptRef>,
    pub related: Vec<ConceptRef>,
    pub broad_match: Vec<ConceptRef>,
    pub narrow_match: Vec<ConceptRef>,
    pub related_match: Vec<ConceptRef>,
    pub close_match: Vec<ConceptRef>,
    pub exact_match: Vec<ConceptRef>,
}

impl RdfGraph {
    fn node(&self, uri: &str) -> Option<&GraphNode> {
        self.graph.iter().find(|n| n.uri == uri)
    }

    /// Label a reference using the graph's own node for it; unknown
    /// resources are labelled with their URI.
    fn label_ref(&self, reference: &Reference, lang: Option<&str>) -> ConceptRef {
        let uri = reference.uri();
        let label = self
            .node(uri)
            .and_then(|n| pick_literal(&n.pref_label, lang))
            .map(|l| l.value().to_string())
            .unwrap_or_else(|| uri.to_string());
        ConceptRef::new(uri, label)
    }

    fn label_refs(&self, refs: &[Reference], lang: Option<&str>) -> Vec<ConceptRef> {
        refs.iter().map(|r| self.label_ref(r, lang)).collect()
    }

    /// Extract the concept identified by `uri`.
    ///
    /// Returns `Error::NotFound` when the graph has no node for the URI,
    /// which is what an empty (default) graph yields.
    pub fn concept(&self, uri: &str, lang: Option<&str>) -> Result<Concept> {
        let node = self
            .node(uri)
            .ok_or_else(|| Error::NotFound(format!("concept {} not in graph", uri)))?;

        Ok(Concept {
            uri: node.uri.clone(),
            created: node.created.as_ref().and_then(|l| parse_timestamp(l.value())),
            modified: node.modified.as_ref().and_then(|l| parse_timestamp(l.value())),
            pref_label: pick_literal(&node.pref_label, lang).map(|l| l.value().to_string()),
            alt_labels: literals_in(&node.alt_label, lang),
            definition: literals_in(&node.definition, lang),
            definition_source: literals_in(&node.definition_source, None),
            scheme: node.in_scheme.iter().map(|r| r.uri().to_string()).collect(),
            broader: self.label_refs(&node.broader, lang),
            narrower: self.label_refs(&node.narrower, lang),
            related: self.label_refs(&node.related, lang),
            broad_match: self.label_refs(&node.broad_match, lang),
            narrow_match: self.label_refs(&node.narrow_match, lang),
            related_match: self.label_refs(&node.related_match, lang),
            close_match: self.label_refs(&node.close_match, lang),
            exact_match: self.label_refs(&node.exact_match, lang),
        })
    }
}

// =============================================================================
// /{vocid}/broaderTransitive
// =============================================================================

#[derive(Deserialize)]
struct RawBroaderEntry {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default, rename = "prefLabel")]
    pref_label: Option<Literal>,
    #[serde(default, deserialize_with = "one_or_many")]
    broader: Vec<String>,
}

impl RawBroaderEntry {
    fn into_edge(self, key: Option<String>) -> BroaderEdge {
        let uri = self.uri.or(key).unwrap_or_default();
        let label = self
            .pref_label
            .map(|l| l.value().to_string())
            .unwrap_or_default();
        BroaderEdge::new(uri, self.broader, label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBroaderSet {
    Keyed(BTreeMap<String, RawBroaderEntry>),
    Listed(Vec<RawBroaderEntry>),
}

fn broader_edges<'de, D>(deserializer: D) -> std::result::Result<Vec<BroaderEdge>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawBroaderSet>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RawBroaderSet::Keyed(map)) => map
            .into_iter()
            .map(|(key, entry)| entry.into_edge(Some(key)))
            .collect(),
        Some(RawBroaderSet::Listed(list)) => {
            list.into_iter().map(|entry| entry.into_edge(None)).collect()
        }
    })
}

/// Response of `/{vocid}/broaderTransitive`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BroaderTransitiveResult {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default, rename = "broaderTransitive", deserialize_with = "broader_edges")]
    pub broader_transitive: Vec<BroaderEdge>,
}

// =============================================================================
// /search
// =============================================================================

/// One hit of a keyword search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub uri: String,
    #[serde(default, rename = "type", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, rename = "prefLabel")]
    pub pref_label: Option<String>,
    #[serde(default, rename = "altLabel")]
    pub alt_label: Option<String>,
    #[serde(default, rename = "hiddenLabel")]
    pub hidden_label: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub vocab: Option<String>,
    #[serde(default)]
    pub exvocab: Option<String>,
    #[serde(default)]
    pub notation: Option<String>,
}

/// Response of `/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

// =============================================================================
// /vocabularies
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySummary {
    #[serde(default)]
    pub uri: Option<String>,
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response of `/vocabularies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VocabularyList {
    #[serde(default)]
    pub vocabularies: Vec<VocabularySummary>,
}

// =============================================================================
// /label
// =============================================================================

/// Response of `/label`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LabelResult {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default, rename = "prefLabel")]
    pub pref_label: Option<String>,
}
