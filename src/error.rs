//! Unified error handling for the dbptools crate
//!
//! Two kinds of failure reach callers:
//!
//! - domain errors ([`Error::NotInDbpedia`], [`Error::NotAPerson`]) raised
//!   when a question cannot be answered for the entity at hand
//! - query errors ([`Error::Query`]) coming straight from the transport
//!
//! None of them are retried internally.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dbptools::error::Error;
//!
//! match entity.is_dead().await {
//!     Ok(dead) => println!("dead: {dead}"),
//!     Err(Error::NotAPerson { name }) => eprintln!("{name} is not a person"),
//!     Err(e) if e.is_recoverable() => eprintln!("try again later: {e}"),
//!     Err(e) => eprintln!("fatal: {e}"),
//! }
//! ```

use thiserror::Error;

pub use crate::sparql::error::QueryError;

/// Unified error type for the dbptools crate
#[derive(Error, Debug)]
pub enum Error {
    /// Name does not denote a resource, directly or through a redirect
    #[error("'{name}' not in DBpedia")]
    NotInDbpedia { name: String },

    /// Person-specific fact requested for an entity that is not a dbo:Person
    #[error("'{name}' is not a person")]
    NotAPerson { name: String },

    /// Query transport errors
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is transient (the same call might succeed later)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Query(e) => e.is_recoverable(),
            Self::NotInDbpedia { .. } | Self::NotAPerson { .. } | Self::Config(_) => false,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
