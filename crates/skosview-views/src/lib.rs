//! # skosview-views
//!
//! Listing-framework integration for the Skosmos API.
//!
//! This crate provides:
//! - Query parameter translation from filter predicates to API arguments
//! - Query executors for concept, breadcrumb, search and vocabulary listings
//! - A full pager for paged search listings
//! - Concept URI argument title lookup and validation
//! - Multi-value field renderers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use skosview_client::SkosmosClient;
//! use skosview_views::{BreadcrumbQuery, ExecutionContext, SkosmosQuery};
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = Arc::new(SkosmosClient::from_env().unwrap());
//!     let (ctx, _messages) = ExecutionContext::with_log("en");
//!     let mut query = BreadcrumbQuery::new(api, ctx);
//!     query.add_where(None, "vocid", json!("yso"));
//!     query.add_where(None, "uri", json!("http://www.yso.fi/onto/yso/p4"));
//!     for row in query.run(None).await.result {
//!         println!("{:?}", row.get("breadcrumbs"));
//!     }
//! }
//! ```

pub mod argument;
pub mod context;
pub mod pager;
pub mod query;
pub mod render;
pub mod rows;
pub mod translator;

// Mock gateway for testing
pub mod mock;

pub use argument::{ConceptUriArgument, ConceptUriValidator};
pub use context::ExecutionContext;
pub use pager::Pager;
pub use query::{
    BreadcrumbQuery, BuiltQuery, ConceptQuery, QueryBase, SearchQuery, SkosmosQuery,
    VocabulariesQuery,
};
pub use render::{LabelListField, ListDisplay, ListField};
pub use rows::{ResultRow, ViewExecution};
pub use translator::{translate, ArgumentTemplate, FromPositional, QueryArguments};
