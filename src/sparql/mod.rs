//! SPARQL query submission
//!
//! This module wraps the remote endpoint behind a small seam:
//! - [`SparqlTransport`] executes a complete query text and parses the JSON result
//! - [`HttpTransport`] is the reqwest implementation used against DBpedia
//! - [`QueryClient`] prepends the shared prefixes and handles verbosity
//!
//! Tests substitute their own transport instead of touching the network.

pub mod error;
pub mod query;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::SparqlConfig;
pub use error::QueryError;
use query::QUERY_PREFIXES;

/// Media type of SPARQL 1.1 JSON results
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// One bound value in a SELECT result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingValue {
    /// `uri`, `literal`, `typed-literal` or `bnode`
    #[serde(rename = "type")]
    pub kind: String,

    /// URI or lexical form
    pub value: String,

    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

/// One SELECT result row, keyed by variable name
pub type Binding = HashMap<String, BindingValue>;

/// `results` member of a SELECT response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// `head` member of a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

/// Parsed SPARQL JSON result document
///
/// ASK queries fill `boolean`, SELECT queries fill `results`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub head: ResultHead,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultSet>,
}

impl QueryResult {
    /// Build an ASK answer
    pub fn ask(answer: bool) -> Self {
        Self {
            boolean: Some(answer),
            ..Default::default()
        }
    }

    /// Build a SELECT answer
    pub fn select(vars: Vec<String>, bindings: Vec<Binding>) -> Self {
        Self {
            head: ResultHead { vars },
            boolean: None,
            results: Some(ResultSet { bindings }),
        }
    }

    /// Answer of an ASK query
    ///
    /// # Errors
    ///
    /// Returns `QueryError::UnexpectedShape` if the document has no boolean
    pub fn boolean(&self) -> Result<bool, QueryError> {
        self.boolean.ok_or_else(|| {
            QueryError::UnexpectedShape("expected an ASK result with a boolean".to_string())
        })
    }

    /// Rows of a SELECT query (empty if the document has none)
    pub fn bindings(&self) -> &[Binding] {
        self.results
            .as_ref()
            .map(|r| r.bindings.as_slice())
            .unwrap_or_default()
    }
}

/// Executes complete query texts against some SPARQL endpoint
#[async_trait]
pub trait SparqlTransport: Send + Sync {
    /// Run `query` and return the parsed result document
    async fn execute(&self, query: &str) -> Result<QueryResult, QueryError>;
}

/// SPARQL protocol over HTTP GET
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidConfig` if the user agent is not a valid
    /// header value and `QueryError::Http` if the HTTP client cannot be created
    pub fn new(config: &SparqlConfig) -> Result<Self, QueryError> {
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            QueryError::InvalidConfig(format!("user agent {:?}: {e}", config.user_agent))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(SPARQL_RESULTS_JSON));
        headers.insert(USER_AGENT, agent);

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Endpoint URL queries are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SparqlTransport for HttpTransport {
    async fn execute(&self, query: &str) -> Result<QueryResult, QueryError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("format", SPARQL_RESULTS_JSON)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %self.endpoint, status = status.as_u16(), "SPARQL query rejected");
            return Err(QueryError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Submits query bodies with the shared prefix block
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct QueryClient {
    transport: Arc<dyn SparqlTransport>,
    verbose: bool,
}

impl QueryClient {
    /// Wrap an arbitrary transport
    pub fn new(transport: Arc<dyn SparqlTransport>, verbose: bool) -> Self {
        Self { transport, verbose }
    }

    /// Create a client talking HTTP to the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &SparqlConfig) -> Result<Self, QueryError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.verbose))
    }

    /// Prepend [`QUERY_PREFIXES`] to `query_text` and execute it
    ///
    /// Transport errors are returned unchanged.
    pub async fn submit(&self, query_text: &str) -> Result<QueryResult, QueryError> {
        let query = format!("{QUERY_PREFIXES}{query_text}");

        if self.verbose {
            tracing::info!(query = %query, "Submitting SPARQL query");
        } else {
            tracing::debug!(query = %query_text, "Submitting SPARQL query");
        }

        self.transport.execute(&query).await
    }
}
