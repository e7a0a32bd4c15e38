//! Mock We Are Hunted server
//!
//! Provides a [`MockHuntedServer`] that serves the suggest, chart and
//! artist lookup endpoints under an `/api` prefix, like the real service.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches the raw (percent-encoded) query string exactly
///
/// `wiremock::matchers::query_param` ignores parameter order and repeats;
/// this one checks both.
#[derive(Debug, Clone)]
pub struct QueryIs(pub String);

impl QueryIs {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }
}

impl Match for QueryIs {
    fn matches(&self, request: &Request) -> bool {
        request.url.query().unwrap_or("") == self.0
    }
}

/// Mock We Are Hunted API server
///
/// # Example
///
/// ```rust,ignore
/// let server = MockHuntedServer::start().await;
/// server.mock_artist_lookup("text=Shakira", vec![48031]).await;
/// let config = HuntedConfig::with_url(server.url());
/// ```
pub struct MockHuntedServer {
    server: MockServer,
}

impl MockHuntedServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure the client with (includes the `/api` prefix)
    pub fn url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    /// Mount a JSON `results` response for an exact path and query
    async fn mount_results(&self, endpoint: &str, query: &str, results: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api{}", endpoint)))
            .and(QueryIs::new(query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mount suggestions for `/suggest/singles/?{query}`
    pub async fn mock_suggest(&self, query: &str, tracks: Vec<TrackFixture>) {
        let results: Vec<Value> = tracks.iter().map(TrackFixture::to_json).collect();
        self.mount_results("/suggest/singles/", query, Value::Array(results))
            .await;
    }

    /// Mount a chart for `/chart{chart_path}?{query}`
    pub async fn mock_chart(&self, chart_path: &str, query: &str, tracks: Vec<TrackFixture>) {
        let results: Vec<Value> = tracks.iter().map(TrackFixture::to_json).collect();
        self.mount_results(&format!("/chart{}", chart_path), query, Value::Array(results))
            .await;
    }

    /// Mount artist lookup results as bare IDs
    pub async fn mock_artist_lookup(&self, query: &str, ids: Vec<u64>) {
        self.mount_results("/lookup/artist/", query, json!(ids)).await;
    }

    /// Mount artist lookup results as `{id, name}` objects
    pub async fn mock_artist_lookup_named(&self, query: &str, artists: Vec<(u64, &str)>) {
        let results: Vec<Value> = artists
            .into_iter()
            .map(|(id, name)| json!({ "id": id, "name": name }))
            .collect();
        self.mount_results("/lookup/artist/", query, Value::Array(results))
            .await;
    }

    /// Mount artist lookup results for a free-text query
    ///
    /// Matches on the decoded `text` value, so the whole text has to arrive
    /// as one parameter.
    pub async fn mock_artist_lookup_text(&self, text: &str, ids: Vec<u64>) {
        Mock::given(method("GET"))
            .and(path("/api/lookup/artist/"))
            .and(query_param("text", text))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": ids })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer every GET under the API with `status` and a plain-text body
    pub async fn mock_status(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path_regex("^/api/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

/// Fixture for a track in a `results` array
#[derive(Debug, Clone)]
pub struct TrackFixture {
    pub artist: String,
    pub title: String,
    pub links: Vec<(String, Option<String>)>,
}

impl TrackFixture {
    /// Create a track with no provider links
    pub fn new(artist: &str, title: &str) -> Self {
        Self {
            artist: artist.to_string(),
            title: title.to_string(),
            links: Vec::new(),
        }
    }

    /// Add a provider link; `None` serializes as `null`
    pub fn with_link(mut self, provider: &str, url: Option<&str>) -> Self {
        self.links
            .push((provider.to_string(), url.map(ToString::to_string)));
        self
    }

    /// `count` copies numbered from 1, each with a distinct title
    pub fn many(artist: &str, count: usize) -> Vec<Self> {
        (1..=count)
            .map(|i| Self::new(artist, &format!("Track {}", i)))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        let links: serde_json::Map<String, Value> = self
            .links
            .iter()
            .map(|(provider, url)| (provider.clone(), json!(url)))
            .collect();

        json!({
            "artist": self.artist,
            "title": self.title,
            "links": links,
        })
    }
}
