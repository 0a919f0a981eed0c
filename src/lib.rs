//! dbptools - yes/no questions about named entities from DBpedia
//!
//! A thin client over the DBpedia SPARQL endpoint: it turns a name into a
//! DBpedia resource name, checks that the resource exists (following one
//! redirect if needed) and answers a few fixed questions about it with ASK
//! queries.
//!
//! # Architecture
//!
//! - [`config`] - Endpoint and logging configuration
//! - [`sparql`] - Query templates, result model and the HTTP transport
//! - [`entity`] - Name formatting, resolution and memoized fact queries
//! - [`logging`] - Tracing subscriber setup
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use dbptools::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!     dbptools::logging::init(&config.logging)?;
//!
//!     let client = QueryClient::from_config(&config.sparql)?;
//!     let mut merkel = DbpEntity::new(&client, "Angela Merkel").await?;
//!
//!     assert!(merkel.is_person().await?);
//!     assert!(merkel.is_politician().await?);
//!     assert!(!merkel.is_dead().await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod sparql;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::entity::{format_name, resolve, DbpEntity, ResolvedName};
    pub use crate::error::{Error, QueryError, Result};
    pub use crate::sparql::{HttpTransport, QueryClient, QueryResult, SparqlTransport};
}

pub use entity::{format_name, DbpEntity, ResolvedName};
pub use error::{Error, Result};
