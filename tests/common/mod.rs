//! Common test utilities
//!
//! A `wiremock` server stands in for the DBpedia endpoint. Mocks are keyed on
//! a fragment of the `query` parameter so each template can be answered
//! independently.

use dbptools::config::SparqlConfig;
use dbptools::sparql::QueryClient;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Path the mock endpoint listens on
pub const SPARQL_PATH: &str = "/sparql";

/// Matches requests whose `query` parameter contains a fragment
pub struct QueryContains(String);

impl Match for QueryContains {
    fn matches(&self, request: &Request) -> bool {
        request
            .url
            .query_pairs()
            .any(|(key, value)| key == "query" && value.contains(&self.0))
    }
}

/// Match on a fragment of the submitted query text
pub fn query_contains(fragment: impl Into<String>) -> QueryContains {
    QueryContains(fragment.into())
}

/// Endpoint configuration pointing at the mock server
pub fn sparql_config(server: &MockServer) -> SparqlConfig {
    SparqlConfig {
        endpoint: format!("{}{SPARQL_PATH}", server.uri()),
        request_timeout_secs: 5,
        verbose: true,
        ..Default::default()
    }
}

/// HTTP-backed client pointing at the mock server
pub fn client(server: &MockServer) -> QueryClient {
    QueryClient::from_config(&sparql_config(server)).expect("client should build")
}

/// SPARQL JSON body of an ASK answer
pub fn ask_body(answer: bool) -> serde_json::Value {
    json!({ "head": { "link": [] }, "boolean": answer })
}

/// SPARQL JSON body of a redirect lookup
#[allow(dead_code)]
pub fn redirect_body(target: Option<&str>) -> serde_json::Value {
    let bindings = match target {
        Some(name) => vec![json!({
            "entity": { "type": "uri", "value": format!("http://dbpedia.org/resource/{name}") }
        })],
        None => Vec::new(),
    };

    json!({
        "head": { "link": [], "vars": ["entity"] },
        "results": { "distinct": false, "ordered": true, "bindings": bindings }
    })
}

/// Answer an ASK query containing `fragment`, expecting exactly `calls` requests
#[allow(dead_code)]
pub async fn mount_ask(server: &MockServer, fragment: &str, answer: bool, calls: u64) {
    Mock::given(method("GET"))
        .and(path(SPARQL_PATH))
        .and(query_contains(fragment))
        .respond_with(ResponseTemplate::new(200).set_body_json(ask_body(answer)))
        .expect(calls)
        .mount(server)
        .await;
}

/// Answer the redirect lookup for `name`
#[allow(dead_code)]
pub async fn mount_redirect(server: &MockServer, name: &str, target: Option<&str>) {
    Mock::given(method("GET"))
        .and(path(SPARQL_PATH))
        .and(query_contains(format!("dbpedia:{name} dbo:wikiPageRedirects")))
        .respond_with(ResponseTemplate::new(200).set_body_json(redirect_body(target)))
        .expect(1)
        .mount(server)
        .await;
}
