//! Entity resolution and fact queries
//!
//! An entity is looked up once, when it is created:
//! 1. the requested name is formatted ([`format_name`])
//! 2. if `dbpedia:<name> a owl:Thing` holds, that name is used
//! 3. otherwise a single `dbo:wikiPageRedirects` hop is followed
//! 4. if neither works the lookup fails with [`Error::NotInDbpedia`]
//!
//! Fact queries only accept a [`ResolvedName`], which can only be produced by
//! a successful lookup.
//!
//! # Example
//!
//! ```no_run
//! use dbptools::config::Config;
//! use dbptools::entity::DbpEntity;
//! use dbptools::sparql::QueryClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = QueryClient::from_config(&config.sparql)?;
//!
//!     let mut entity = DbpEntity::new(&client, "Otto von Bismarck").await?;
//!     if entity.is_person().await? {
//!         println!("dead: {}", entity.is_dead().await?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod name;

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::sparql::query::{self, OntologyClass, REDIRECT_VARIABLE, RESOURCE_NAMESPACE};
use crate::sparql::QueryClient;
pub use name::format_name;

/// Name of a resource known to exist in DBpedia
///
/// Only produced by [`resolve`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedName(String);

impl ResolvedName {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Resource name without namespace (`Angela_Merkel`)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full resource URI (`http://dbpedia.org/resource/Angela_Merkel`)
    pub fn uri(&self) -> String {
        format!("{RESOURCE_NAMESPACE}{}", self.0)
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve a free-text name to an existing DBpedia resource
///
/// # Errors
///
/// Returns `Error::NotInDbpedia` (carrying the formatted name) when the name
/// neither exists nor redirects, and `Error::Query` on transport failure.
pub async fn resolve(client: &QueryClient, raw_name: &str) -> Result<ResolvedName> {
    let formatted = format_name(raw_name);
    if formatted.is_empty() {
        return Err(Error::NotInDbpedia { name: formatted });
    }

    let exists = client
        .submit(&query::existence_query(&formatted))
        .await?
        .boolean()?;
    if exists {
        tracing::debug!(name = %formatted, "Resource exists");
        return Ok(ResolvedName::new(formatted));
    }

    let result = client.submit(&query::redirect_query(&formatted)).await?;
    let target = result
        .bindings()
        .first()
        .and_then(|binding| binding.get(REDIRECT_VARIABLE))
        .map(|value| value.value.as_str());

    match target {
        Some(uri) => {
            let resolved = uri.rsplit('/').next().unwrap_or(uri);
            tracing::debug!(name = %formatted, target = %resolved, "Following redirect");
            Ok(ResolvedName::new(resolved))
        }
        None => {
            tracing::debug!(name = %formatted, "Resource not found");
            Err(Error::NotInDbpedia { name: formatted })
        }
    }
}

/// A resolved DBpedia entity with memoized facts
///
/// Each fact is fetched with one ASK query on first use and cached for the
/// lifetime of the value.
pub struct DbpEntity<'a> {
    client: &'a QueryClient,
    requested_name: String,
    resolved_name: ResolvedName,
    person: Option<bool>,
    politician: Option<bool>,
    dead: Option<bool>,
}

impl<'a> DbpEntity<'a> {
    /// Resolve `name` and create an entity for it
    ///
    /// # Errors
    ///
    /// Returns `Error::NotInDbpedia` if `name` cannot be resolved
    pub async fn new(client: &'a QueryClient, name: &str) -> Result<Self> {
        let resolved_name = resolve(client, name).await?;

        Ok(Self {
            client,
            requested_name: name.to_string(),
            resolved_name,
            person: None,
            politician: None,
            dead: None,
        })
    }

    /// Name as passed to [`DbpEntity::new`]
    pub fn requested_name(&self) -> &str {
        &self.requested_name
    }

    /// Name of the resource this entity was resolved to
    pub fn resolved_name(&self) -> &ResolvedName {
        &self.resolved_name
    }

    /// Whether the entity is a `dbo:Person`
    pub async fn is_person(&mut self) -> Result<bool> {
        if let Some(person) = self.person {
            return Ok(person);
        }

        let person = self
            .ask(&query::type_query(&self.resolved_name, OntologyClass::Person))
            .await?;
        self.person = Some(person);
        Ok(person)
    }

    /// Whether the entity is a `dbo:Politician`
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAPerson` if the entity is not a `dbo:Person`
    pub async fn is_politician(&mut self) -> Result<bool> {
        self.require_person().await?;

        if let Some(politician) = self.politician {
            return Ok(politician);
        }

        let politician = self
            .ask(&query::type_query(&self.resolved_name, OntologyClass::Politician))
            .await?;
        self.politician = Some(politician);
        Ok(politician)
    }

    /// Whether any death-related property is set for the entity
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAPerson` if the entity is not a `dbo:Person`
    pub async fn is_dead(&mut self) -> Result<bool> {
        self.require_person().await?;

        if let Some(dead) = self.dead {
            return Ok(dead);
        }

        let dead = self.ask(&query::death_query(&self.resolved_name)).await?;
        self.dead = Some(dead);
        Ok(dead)
    }

    async fn require_person(&mut self) -> Result<()> {
        if self.is_person().await? {
            Ok(())
        } else {
            Err(Error::NotAPerson {
                name: self.resolved_name.to_string(),
            })
        }
    }

    async fn ask(&self, query_text: &str) -> Result<bool> {
        Ok(self.client.submit(query_text).await?.boolean()?)
    }
}

impl fmt::Debug for DbpEntity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbpEntity")
            .field("requested_name", &self.requested_name)
            .field("resolved_name", &self.resolved_name)
            .field("person", &self.person)
            .field("politician", &self.politician)
            .field("dead", &self.dead)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::{BindingValue, QueryError, QueryResult, SparqlTransport};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Answers queries by the first pattern the query text contains
    struct ScriptedTransport {
        answers: Vec<(&'static str, QueryResult)>,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(answers: Vec<(&'static str, QueryResult)>) -> Arc<Self> {
            Arc::new(Self {
                answers,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn count(&self, pattern: &str) -> usize {
            self.queries
                .lock()
                .unwrap()
                .iter()
                .filter(|q| q.contains(pattern))
                .count()
        }

        fn total(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SparqlTransport for ScriptedTransport {
        async fn execute(&self, query: &str) -> std::result::Result<QueryResult, QueryError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.answers
                .iter()
                .find(|(pattern, _)| query.contains(pattern))
                .map(|(_, result)| result.clone())
                .ok_or(QueryError::Status(400))
        }
    }

    fn redirect_to(uri: &str) -> QueryResult {
        let mut binding = HashMap::new();
        binding.insert(
            "entity".to_string(),
            BindingValue {
                kind: "uri".to_string(),
                value: uri.to_string(),
                lang: None,
                datatype: None,
            },
        );
        QueryResult::select(vec!["entity".to_string()], vec![binding])
    }

    fn no_redirect() -> QueryResult {
        QueryResult::select(vec!["entity".to_string()], Vec::new())
    }

    fn merkel() -> Arc<ScriptedTransport> {
        ScriptedTransport::new(vec![
            ("dbpedia:Angela_Merkel a owl:Thing", QueryResult::ask(true)),
            ("dbpedia:Angie_Merkel a owl:Thing", QueryResult::ask(false)),
            (
                "dbpedia:Angie_Merkel dbo:wikiPageRedirects",
                redirect_to("http://dbpedia.org/resource/Angela_Merkel"),
            ),
            ("dbpedia:Angela_Merkel a dbo:Person", QueryResult::ask(true)),
            ("dbpedia:Angela_Merkel a dbo:Politician", QueryResult::ask(true)),
            ("dbpedia:Angela_Merkel dbo:deathPlace", QueryResult::ask(false)),
        ])
    }

    fn candiru() -> Arc<ScriptedTransport> {
        ScriptedTransport::new(vec![
            ("dbpedia:Candiru a owl:Thing", QueryResult::ask(true)),
            ("dbpedia:Candiru a dbo:Person", QueryResult::ask(false)),
        ])
    }

    #[tokio::test]
    async fn test_resolve_existing() {
        let transport = merkel();
        let client = QueryClient::new(transport.clone(), false);

        let name = resolve(&client, "Angela Merkel").await.unwrap();
        assert_eq!(name.as_str(), "Angela_Merkel");
        assert_eq!(name.uri(), "http://dbpedia.org/resource/Angela_Merkel");
        assert_eq!(transport.count("wikiPageRedirects"), 0);
    }

    #[tokio::test]
    async fn test_resolve_follows_redirect() {
        let client = QueryClient::new(merkel(), false);

        let name = resolve(&client, "Angie Merkel").await.unwrap();
        assert_eq!(name.as_str(), "Angela_Merkel");
    }

    #[tokio::test]
    async fn test_resolve_not_in_dbpedia() {
        let transport = ScriptedTransport::new(vec![
            ("a owl:Thing", QueryResult::ask(false)),
            ("wikiPageRedirects", no_redirect()),
        ]);
        let client = QueryClient::new(transport, false);

        let err = resolve(&client, "Nonexistent_person").await.unwrap_err();
        match err {
            Error::NotInDbpedia { name } => assert_eq!(name, "Nonexistent_person"),
            other => panic!("expected NotInDbpedia, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_lowercase_name_via_redirect() {
        let transport = ScriptedTransport::new(vec![
            ("dbpedia:Angela_merkel a owl:Thing", QueryResult::ask(false)),
            (
                "dbpedia:Angela_merkel dbo:wikiPageRedirects",
                redirect_to("http://dbpedia.org/resource/Angela_Merkel"),
            ),
        ]);
        let client = QueryClient::new(transport.clone(), false);

        let name = resolve(&client, "angela merkel").await.unwrap();
        assert_eq!(name.as_str(), "Angela_Merkel");
        assert_eq!(transport.count("dbpedia:Angela_merkel a owl:Thing"), 1);
    }

    #[test]
    fn test_resolved_name_serializes_as_string() {
        let name = ResolvedName::new("Angela_Merkel");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Angela_Merkel\"");
    }

    #[tokio::test]
    async fn test_resolve_empty_name() {
        let transport = ScriptedTransport::new(Vec::new());
        let client = QueryClient::new(transport.clone(), false);

        let err = resolve(&client, "   ").await.unwrap_err();
        assert!(matches!(err, Error::NotInDbpedia { ref name } if name.is_empty()));
        assert_eq!(transport.total(), 0);
    }

    #[tokio::test]
    async fn test_resolve_propagates_transport_error() {
        let client = QueryClient::new(ScriptedTransport::new(Vec::new()), false);

        let err = resolve(&client, "Angela Merkel").await.unwrap_err();
        assert!(matches!(err, Error::Query(QueryError::Status(400))));
    }

    #[tokio::test]
    async fn test_resolve_rejects_select_shaped_existence_answer() {
        let transport = ScriptedTransport::new(vec![("a owl:Thing", no_redirect())]);
        let client = QueryClient::new(transport, false);

        let err = resolve(&client, "Angela Merkel").await.unwrap_err();
        assert!(matches!(err, Error::Query(QueryError::UnexpectedShape(_))));
    }

    #[tokio::test]
    async fn test_entity_facts() {
        let client = QueryClient::new(merkel(), true);
        let mut entity = DbpEntity::new(&client, "Angela Merkel").await.unwrap();

        assert_eq!(entity.requested_name(), "Angela Merkel");
        assert_eq!(entity.resolved_name().as_str(), "Angela_Merkel");
        assert!(entity.is_person().await.unwrap());
        assert!(entity.is_politician().await.unwrap());
        assert!(!entity.is_dead().await.unwrap());
    }

    #[tokio::test]
    async fn test_facts_are_memoized() {
        let transport = merkel();
        let client = QueryClient::new(transport.clone(), false);
        let mut entity = DbpEntity::new(&client, "Angela Merkel").await.unwrap();
        let after_resolve = transport.total();

        for _ in 0..3 {
            entity.is_person().await.unwrap();
            entity.is_politician().await.unwrap();
            entity.is_dead().await.unwrap();
        }

        assert_eq!(transport.count("a dbo:Person"), 1);
        assert_eq!(transport.count("a dbo:Politician"), 1);
        assert_eq!(transport.count("dbo:deathPlace"), 1);
        assert_eq!(transport.total() - after_resolve, 3);
    }

    #[tokio::test]
    async fn test_not_a_person() {
        let transport = candiru();
        let client = QueryClient::new(transport.clone(), false);
        let mut entity = DbpEntity::new(&client, "candiru").await.unwrap();

        assert!(!entity.is_person().await.unwrap());
        assert!(matches!(
            entity.is_politician().await,
            Err(Error::NotAPerson { ref name }) if name == "Candiru"
        ));
        assert!(matches!(
            entity.is_dead().await,
            Err(Error::NotAPerson { .. })
        ));

        assert_eq!(transport.count("a dbo:Person"), 1);
        assert_eq!(transport.count("a dbo:Politician"), 0);
        assert_eq!(transport.count("dbo:deathPlace"), 0);
    }

    #[tokio::test]
    async fn test_failed_query_is_not_memoized() {
        let transport = ScriptedTransport::new(vec![(
            "dbpedia:Angela_Merkel a owl:Thing",
            QueryResult::ask(true),
        )]);
        let client = QueryClient::new(transport.clone(), false);
        let mut entity = DbpEntity::new(&client, "Angela Merkel").await.unwrap();

        assert!(entity.is_person().await.is_err());
        assert!(entity.is_person().await.is_err());
        assert_eq!(transport.count("a dbo:Person"), 2);
    }
}
