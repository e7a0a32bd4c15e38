//! We Are Hunted request and response models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HuntedError;
use crate::query::{OptionValue, Options};

/// A service a track can link out to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Image,
    Youtube,
    Myspace,
    Spotify,
    Grooveshark,
    LastFm,
    Itunes,
}

impl Provider {
    pub const ALL: [Provider; 7] = [
        Provider::Image,
        Provider::Youtube,
        Provider::Myspace,
        Provider::Spotify,
        Provider::Grooveshark,
        Provider::LastFm,
        Provider::Itunes,
    ];

    /// Name used by the API, both in queries and as a `links` key
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Image => "image",
            Provider::Youtube => "youtube",
            Provider::Myspace => "myspace",
            Provider::Spotify => "spotify",
            Provider::Grooveshark => "grooveshark",
            Provider::LastFm => "last.fm",
            Provider::Itunes => "itunes",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = HuntedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| HuntedError::InvalidArgument(format!("unknown provider '{}'", s)))
    }
}

/// A track from a suggestion or chart result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Artist name
    pub artist: String,
    /// Track title
    #[serde(default)]
    pub title: Option<String>,
    /// Provider name to URL; `null` when the provider has no link
    #[serde(default)]
    pub links: BTreeMap<String, Option<String>>,
    /// Fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    /// The link for a provider, if one was requested and returned
    pub fn link(&self, provider: Provider) -> Option<&str> {
        self.links
            .get(provider.as_str())
            .and_then(|url| url.as_deref())
    }
}

/// An artist name paired with its We Are Hunted ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistMatch {
    pub name: String,
    pub id: u64,
}

/// Typed builder for suggestion options
///
/// ```
/// use wearehunted_client::{Provider, SuggestRequest};
///
/// let options = SuggestRequest::new()
///     .name("Shakira")
///     .provider(Provider::Itunes)
///     .count(5)
///     .into_options();
/// assert_eq!(wearehunted_client::encode(&options), "?name=Shakira&provider=itunes&count=5");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestRequest {
    text: Option<String>,
    names: Vec<String>,
    artists: Vec<u64>,
    emerging: Option<bool>,
    providers: Vec<Provider>,
    allow_blanks: Option<bool>,
    include_seeds: Option<bool>,
    count: Option<u32>,
}

impl SuggestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block of text to mine for known artist names
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Seed artist by name; may be called repeatedly
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Seed artist by We Are Hunted ID; may be called repeatedly
    pub fn artist(mut self, id: u64) -> Self {
        self.artists.push(id);
        self
    }

    /// Include emerging artists
    pub fn emerging(mut self, emerging: bool) -> Self {
        self.emerging = Some(emerging);
        self
    }

    /// Ask for links from a provider; may be called repeatedly
    pub fn provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Keep tracks lacking a link for some requested provider
    pub fn allow_blanks(mut self, allow: bool) -> Self {
        self.allow_blanks = Some(allow);
        self
    }

    /// Include the seed artists in the results
    pub fn include_seeds(mut self, include: bool) -> Self {
        self.include_seeds = Some(include);
        self
    }

    /// Maximum number of tracks
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn into_options(self) -> Options {
        self.into()
    }
}

impl From<SuggestRequest> for Options {
    fn from(req: SuggestRequest) -> Self {
        let mut options = Options::new();
        if let Some(text) = req.text {
            options.insert("text", text);
        }
        if !req.names.is_empty() {
            options.insert("name", req.names);
        }
        if !req.artists.is_empty() {
            options.insert("artist", req.artists);
        }
        if let Some(emerging) = req.emerging {
            options.insert("emerging", emerging);
        }
        if !req.providers.is_empty() {
            options.insert(
                "provider",
                OptionValue::List(req.providers.iter().map(|p| p.to_string()).collect()),
            );
        }
        if let Some(allow) = req.allow_blanks {
            options.insert("allow_blanks", allow);
        }
        if let Some(include) = req.include_seeds {
            options.insert("include_seeds", include);
        }
        if let Some(count) = req.count {
            options.insert("count", count);
        }
        options
    }
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsResponse<T> {
    pub results: Vec<T>,
}

/// Lookup results come back as bare IDs or as `{id, name}` objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawArtistResult {
    Id(u64),
    Entry {
        id: u64,
        #[serde(default)]
        name: Option<String>,
    },
}

impl RawArtistResult {
    pub fn id(&self) -> u64 {
        match self {
            RawArtistResult::Id(id) | RawArtistResult::Entry { id, .. } => *id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RawArtistResult::Id(_) => None,
            RawArtistResult::Entry { name, .. } => name.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::encode;
    use serde_json::json;

    #[test]
    fn test_provider_names() {
        assert_eq!(Provider::LastFm.as_str(), "last.fm");
        assert_eq!("grooveshark".parse::<Provider>().unwrap(), Provider::Grooveshark);
        assert!("napster".parse::<Provider>().is_err());
    }

    #[test]
    fn test_track_parsing_with_links() {
        let track: Track = serde_json::from_value(json!({
            "artist": "Say Hi",
            "title": "Oh Oh Oh Oh Oh Oh Oh Oh",
            "rank": 1,
            "links": {
                "itunes": null,
                "grooveshark": "http://listen.grooveshark.com/#/song/Oh Oh Oh Oh Oh Oh Oh Oh/22791511"
            }
        }))
        .unwrap();

        assert_eq!(track.artist, "Say Hi");
        assert_eq!(track.link(Provider::Itunes), None);
        assert_eq!(
            track.link(Provider::Grooveshark),
            Some("http://listen.grooveshark.com/#/song/Oh Oh Oh Oh Oh Oh Oh Oh/22791511")
        );
        assert_eq!(track.extra.get("rank"), Some(&json!(1)));
    }

    #[test]
    fn test_track_parsing_minimal() {
        let track: Track = serde_json::from_value(json!({"artist": "DELOREAN"})).unwrap();
        assert!(track.title.is_none());
        assert!(track.links.is_empty());
    }

    #[test]
    fn test_suggest_request_into_options() {
        let options = SuggestRequest::new()
            .name("Madonna")
            .name("Shakira")
            .provider(Provider::Itunes)
            .provider(Provider::Grooveshark)
            .include_seeds(true)
            .count(5)
            .into_options();
        assert_eq!(
            encode(&options),
            "?name=Madonna&name=Shakira&provider=itunes&provider=grooveshark&include_seeds=true&count=5"
        );
    }

    #[test]
    fn test_suggest_request_artist_ids() {
        let options = SuggestRequest::new()
            .artist(3024)
            .artist(48452)
            .artist(48031)
            .into_options();
        assert_eq!(encode(&options), "?artist=3024&artist=48452&artist=48031");
    }

    #[test]
    fn test_raw_artist_result_shapes() {
        let results: ResultsResponse<RawArtistResult> =
            serde_json::from_value(json!({"results": [48031, {"id": 100008, "name": "Broken Bells"}]}))
                .unwrap();
        assert_eq!(results.results[0].id(), 48031);
        assert_eq!(results.results[0].name(), None);
        assert_eq!(results.results[1].id(), 100008);
        assert_eq!(results.results[1].name(), Some("Broken Bells"));
    }
}
