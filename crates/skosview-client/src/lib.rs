//! # skosview-client
//!
//! Skosmos REST API client for skosview.
//!
//! This crate provides:
//! - [`SkosmosClient`], the reqwest implementation of [`skosview_core::SkosmosApi`]
//! - [`ClientFactory`], which hands out clients for the host a view is bound to
//! - [`ClientConfig`], loaded from explicit values or `SKOSMOS_*` environment variables
//!
//! # Example
//!
//! ```rust,no_run
//! use skosview_client::SkosmosClient;
//! use skosview_core::{SkosmosApi, VocabulariesRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = SkosmosClient::from_env().unwrap();
//!     let vocabularies = client
//!         .list_vocabularies(&VocabulariesRequest { lang: "en".to_string() })
//!         .await
//!         .unwrap();
//!     println!("{} vocabularies", vocabularies.vocabularies.len());
//! }
//! ```

pub mod client;
pub mod config;
pub mod factory;

pub use client::SkosmosClient;
pub use config::{ClientConfig, ConfigError};
pub use factory::ClientFactory;
