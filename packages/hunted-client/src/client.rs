//! We Are Hunted API client implementation

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use wearehunted_shared_config::HuntedConfig;

use crate::artist::{lookup_options, pair_lookup_results};
use crate::chart::build_chart_path;
use crate::error::{HuntedError, HuntedResult};
use crate::models::{ArtistMatch, RawArtistResult, ResultsResponse, Track};
use crate::query::{encode, escape, Options};
use crate::response::{check_status, parse_body, ResponseBody};

const SUGGEST_PATH: &str = "/suggest/singles/";
const CHART_PATH: &str = "/chart";
const LOOKUP_ARTIST_PATH: &str = "/lookup/artist/";

/// We Are Hunted API client
///
/// Holds only a pooled HTTP client and immutable configuration, so it is
/// cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct HuntedClient {
    http_client: Client,
    config: HuntedConfig,
}

impl fmt::Debug for HuntedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuntedClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl HuntedClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    /// - `HuntedError::Config` if the base URL is not an http(s) URL
    /// - `HuntedError::Http` if the HTTP client cannot be built
    pub fn new(config: &HuntedConfig) -> HuntedResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Create a client from `WEAREHUNTED_*` environment variables
    pub fn from_env() -> HuntedResult<Self> {
        Self::new(&HuntedConfig::from_env()?)
    }

    /// Create a client with custom HTTP client (for testing)
    pub fn with_client(config: &HuntedConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config: config.clone(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &HuntedConfig {
        &self.config
    }

    /// Timeouts get their own variant whether they hit while sending or
    /// while reading the body
    fn transport_error(e: reqwest::Error) -> HuntedError {
        if e.is_timeout() {
            HuntedError::Timeout
        } else {
            HuntedError::Http(e)
        }
    }

    /// GET `path` with `options` encoded onto it and classify the response
    async fn make_request(&self, path: &str, options: &Options) -> HuntedResult<ResponseBody> {
        let url = self
            .config
            .endpoint_url(&format!("{}{}", path, encode(options)));

        debug!(url = %url, "Sending We Are Hunted request");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(Self::transport_error)?;
        let body = check_status(status, text)?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received We Are Hunted response");

        parse_body(&body)
    }

    /// Pull the `results` array out of a response body
    ///
    /// An empty body yields no results.
    fn extract_results<T: DeserializeOwned>(body: ResponseBody) -> HuntedResult<Vec<T>> {
        match body {
            ResponseBody::Empty => Ok(Vec::new()),
            ResponseBody::Json(value) => {
                if value.get("results").is_none() {
                    return Err(HuntedError::InvalidResponse(
                        "missing 'results' field".to_string(),
                    ));
                }
                let response: ResultsResponse<T> = serde_json::from_value(value)?;
                Ok(response.results)
            }
        }
    }

    /// Get suggested tracks for seed artists or a block of text
    ///
    /// Accepts a raw [`Options`] map or a [`crate::SuggestRequest`].
    ///
    /// # Errors
    /// - `HuntedError::Api` - If the API answers with an error status
    /// - `HuntedError::Parse` - If the body is not valid JSON
    /// - `HuntedError::Http` - If the HTTP request fails
    #[instrument(skip(self, options))]
    pub async fn suggest(&self, options: impl Into<Options>) -> HuntedResult<Vec<Track>> {
        let options = options.into();
        debug!(query = %encode(&options), "Fetching suggestions");

        let body = self.make_request(SUGGEST_PATH, &options).await?;
        let tracks: Vec<Track> = Self::extract_results(body)?;

        debug!(result_count = tracks.len(), "Found suggestions");
        Ok(tracks)
    }

    /// Get a chart
    ///
    /// Options must hold either `user`, or `type` (artists, singles) and
    /// `period` (1, 7, 30) with an optional genre `name`. Other keys such as
    /// `count` and `provider` go on the query string.
    ///
    /// # Errors
    /// - `HuntedError::InvalidArgument` - If the chart options are incomplete
    ///   or invalid; no request is sent
    /// - `HuntedError::Api` - If the API answers with an error status
    /// - `HuntedError::Parse` - If the body is not valid JSON
    /// - `HuntedError::Http` - If the HTTP request fails
    #[instrument(skip(self, options))]
    pub async fn chart(&self, options: impl Into<Options>) -> HuntedResult<Vec<Track>> {
        let options = options.into();
        let (chart_path, remaining) = build_chart_path(&options)?;
        let path = format!("{}{}", CHART_PATH, chart_path);

        debug!(path = %path, "Fetching chart");

        let body = self.make_request(&path, &remaining).await?;
        let tracks: Vec<Track> = Self::extract_results(body)?;

        debug!(path = %path, result_count = tracks.len(), "Found chart entries");
        Ok(tracks)
    }

    /// Look up We Are Hunted IDs for artist names
    ///
    /// Returns the names in sorted order, each with its ID.
    ///
    /// # Errors
    /// - `HuntedError::InvalidArgument` - If `names` is empty; no request is sent
    /// - `HuntedError::PairingMismatch` - If the API returns a different
    ///   number of artists than were asked for
    /// - `HuntedError::Api` - If the API answers with an error status
    /// - `HuntedError::Http` - If the HTTP request fails
    #[instrument(skip(self, names), fields(name_count = names.len()))]
    pub async fn artist<S: AsRef<str>>(&self, names: &[S]) -> HuntedResult<Vec<ArtistMatch>> {
        let options = lookup_options(names)?;

        let body = self.make_request(LOOKUP_ARTIST_PATH, &options).await?;
        let results: Vec<RawArtistResult> = Self::extract_results(body)?;
        let pairs = pair_lookup_results(names, &results)?;

        debug!(result_count = pairs.len(), "Resolved artist IDs");
        Ok(pairs)
    }

    /// Find the IDs of every artist mentioned in a block of text
    ///
    /// IDs come back in API order; no pairing is attempted. The text is
    /// form-encoded first, so `&`, `=` and `#` in it are sent as content.
    ///
    /// # Errors
    /// - `HuntedError::InvalidArgument` - If the text is blank
    /// - `HuntedError::Api` - If the API answers with an error status
    /// - `HuntedError::Http` - If the HTTP request fails
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn artist_ids_in_text(&self, text: &str) -> HuntedResult<Vec<u64>> {
        if text.trim().is_empty() {
            return Err(HuntedError::InvalidArgument(
                "lookup text cannot be empty".to_string(),
            ));
        }
        let options = Options::new().with("text", escape(text));

        let body = self.make_request(LOOKUP_ARTIST_PATH, &options).await?;
        let results: Vec<RawArtistResult> = Self::extract_results(body)?;
        let ids: Vec<u64> = results.iter().map(RawArtistResult::id).collect();

        debug!(result_count = ids.len(), "Found artists in text");
        Ok(ids)
    }
}
