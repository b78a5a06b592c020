//! Breadcrumb trail construction over a broader-transitive edge set.
//!
//! A broader-transitive query returns every ancestor of a concept together
//! with each ancestor's *direct* broader concepts. Because SKOS allows
//! polyhierarchy, the ancestors form a DAG and a concept can have several
//! root-to-leaf paths. This module enumerates all of them.
//!
//! # Algorithm
//!
//! Depth-first walk upward from the target concept. The path accumulated so
//! far (leaf first) is passed by value into each recursive call; a trail is
//! emitted, reversed to root-first order, whenever a concept without broader
//! concepts (or one missing from the index) is reached.
//!
//! Vocabularies are user-authored and may contain broader cycles, so a
//! branch is abandoned as soon as it would revisit a concept already on the
//! *current* path. Only path membership is checked: a global visited set
//! would wrongly prune distinct trails that share an ancestor.
//!
//! Distinct branches that rejoin are not merged: each DAG path yields its
//! own trail.

use std::collections::HashMap;

use tracing::trace;

use crate::models::{BroaderEdge, BreadcrumbTrail, ConceptRef};

/// Read-only lookup from concept URI to its broader edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    edges: HashMap<String, BroaderEdge>,
}

impl EdgeIndex {
    /// Index a flat edge list by URI. A later duplicate URI replaces an
    /// earlier one.
    pub fn new(edges: impl IntoIterator<Item = BroaderEdge>) -> Self {
        Self {
            edges: edges.into_iter().map(|e| (e.uri.clone(), e)).collect(),
        }
    }

    pub fn get(&self, uri: &str) -> Option<&BroaderEdge> {
        self.edges.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.edges.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<BroaderEdge> for EdgeIndex {
    fn from_iter<I: IntoIterator<Item = BroaderEdge>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// All breadcrumb trails leading to `uri`, root-first.
///
/// A URI absent from the index yields a single empty trail.
pub fn build_trails(index: &EdgeIndex, uri: &str) -> Vec<BreadcrumbTrail> {
    let trails = trails(index, uri, Vec::new());
    trace!(subsystem = "core", uri, trail_count = trails.len(), "Breadcrumb trails built");
    trails
}

/// Recursive step. `path` holds the concepts below `uri`, leaf first.
pub fn trails(index: &EdgeIndex, uri: &str, path: Vec<ConceptRef>) -> Vec<BreadcrumbTrail> {
    if path.iter().any(|crumb| crumb.uri == uri) {
        trace!(subsystem = "core", uri, depth = path.len(), "Broader cycle detected, branch abandoned");
        return Vec::new();
    }

    match index.get(uri) {
        Some(edge) if !edge.direct_broader_uris.is_empty() => {
            let mut result = Vec::new();
            for broader_uri in &edge.direct_broader_uris {
                if broader_uri == uri {
                    continue;
                }
                let mut new_path = path.clone();
                new_path.push(ConceptRef::new(uri, edge.label.clone()));
                result.extend(trails(index, broader_uri, new_path));
            }
            result
        }
        found => {
            let mut final_path = path;
            if let Some(edge) = found {
                final_path.push(ConceptRef::new(uri, edge.label.clone()));
            }
            final_path.reverse();
            vec![final_path]
        }
    }
}
