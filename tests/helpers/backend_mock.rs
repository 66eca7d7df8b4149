//! Mock REST backend for testing
//!
//! This module provides a mock HTTP server that simulates the events backend
//! for testing purposes. It uses wiremock to create configurable responses.

use serde::Serialize;
use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use PartyBoard::config::ApiConfig;
use PartyBoard::ApiClient;

/// Mock events backend
pub struct BackendMockServer {
    pub server: MockServer,
}

impl BackendMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL the way it appears in settings, without trailing slash
    pub fn api_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url(),
            token: None,
            timeout_seconds: 5,
        }
    }

    pub fn client(&self, token: Option<&str>) -> ApiClient {
        ApiClient::new(&self.api_config(), token.map(str::to_string)).unwrap()
    }

    /// Serve `items` as a bare JSON array
    pub async fn mock_list<T: Serialize>(&self, resource: &str, items: &[T]) {
        Mock::given(method("GET"))
            .and(path(format!("/api/{}/", resource)))
            .respond_with(ResponseTemplate::new(200).set_body_json(items))
            .mount(&self.server)
            .await;
    }

    /// Serve `first` then `second` as two pages of an envelope
    pub async fn mock_paged_list<T: Serialize>(&self, resource: &str, first: &[T], second: &[T]) {
        let endpoint = format!("/api/{}/", resource);
        let next = format!("{}{}?page=2", self.server.uri(), endpoint);

        Mock::given(method("GET"))
            .and(path(endpoint.clone()))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": first.len() + second.len(),
                "next": null,
                "previous": null,
                "results": second,
            })))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": first.len() + second.len(),
                "next": next,
                "previous": null,
                "results": first,
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer any `verb endpoint` call with `status` and a JSON body
    pub async fn mock_response(&self, verb: &str, endpoint: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Require a bearer token on `GET endpoint`, answering with `body`
    pub async fn mock_authorized(&self, endpoint: &str, token: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
