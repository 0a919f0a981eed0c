//! Fixed-shape SPARQL query templates
//!
//! Builders return the query body only. [`QUERY_PREFIXES`] is prepended by
//! [`QueryClient::submit`](super::QueryClient::submit), so every query sent to
//! the endpoint carries the same namespace declarations.

use std::fmt;

use crate::entity::ResolvedName;

/// Namespace for resources (`dbpedia:Angela_Merkel`)
pub const RESOURCE_NAMESPACE: &str = "http://dbpedia.org/resource/";

/// Namespace for ontology terms (`dbo:Person`, `dbo:deathYear`)
pub const ONTOLOGY_NAMESPACE: &str = "http://dbpedia.org/ontology/";

/// Prefix block shared by every query
pub const QUERY_PREFIXES: &str = "
PREFIX dbpedia: <http://dbpedia.org/resource/>
PREFIX dbo: <http://dbpedia.org/ontology/>
";

/// Properties of `dbo:Person` whose presence indicates the person has died
///
/// Taken from <https://dbpedia.org/ontology/Person>. A person with none of
/// these set is reported alive, so gaps in the knowledge base under-report
/// deaths.
pub const DEATH_PROPERTIES: [&str; 11] = [
    "deathPlace",
    "deathDate",
    "deathCause",
    "bodyDiscovered",
    "placeOfBurial",
    "deathYear",
    "causeOfDeath",
    "dateOfBurial",
    "deadInFightDate",
    "deadInFightPlace",
    "deathAge",
];

/// Variable bound by [`redirect_query`]
pub const REDIRECT_VARIABLE: &str = "entity";

/// Ontology classes the fact queries test membership of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OntologyClass {
    Person,
    Politician,
}

impl OntologyClass {
    /// Local name within the `dbo:` namespace
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Politician => "Politician",
        }
    }
}

impl fmt::Display for OntologyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dbo:{}", self.as_str())
    }
}

/// ASK whether `formatted_name` is an `owl:Thing`
///
/// Property queries against a missing resource just answer `false`, so
/// existence has to be checked on its own.
pub fn existence_query(formatted_name: &str) -> String {
    format!("ASK WHERE {{ dbpedia:{formatted_name} a owl:Thing }}")
}

/// SELECT the target of `dbo:wikiPageRedirects` from `formatted_name`
pub fn redirect_query(formatted_name: &str) -> String {
    format!(
        "SELECT ?{REDIRECT_VARIABLE} WHERE {{ dbpedia:{formatted_name} dbo:wikiPageRedirects ?{REDIRECT_VARIABLE} }} LIMIT 1"
    )
}

/// ASK whether the resource is an instance of `class`
pub fn type_query(name: &ResolvedName, class: OntologyClass) -> String {
    format!("ASK WHERE {{ dbpedia:{name} a {class} }}")
}

/// ASK whether the resource has a value for any of [`DEATH_PROPERTIES`]
pub fn death_query(name: &ResolvedName) -> String {
    let path = DEATH_PROPERTIES
        .iter()
        .map(|p| format!("dbo:{p}"))
        .collect::<Vec<_>>()
        .join("|");

    format!("ASK WHERE {{ dbpedia:{name} {path} ?value }}")
}
