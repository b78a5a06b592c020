//! # skosview-core
//!
//! Core types, traits, and abstractions for skosview.
//!
//! This crate provides the data model of Skosmos API responses, the gateway
//! and messenger traits other crates implement, host configuration records,
//! and the breadcrumb trail builder.

pub mod breadcrumbs;
pub mod defaults;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod models;
pub mod predicates;
pub mod traits;

// Re-export commonly used types at crate root
pub use breadcrumbs::{build_trails, EdgeIndex};
pub use error::{ApiError, Error, Result};
pub use hosts::{HostStore, HostValidationError, InMemoryHostStore, SkosmosHost, ViewBinding};
pub use models::*;
pub use predicates::{
    Conjunction, KeywordFilter, KeywordOperator, Operator, Predicate, WhereClause, WhereGroup,
};
pub use traits::*;
