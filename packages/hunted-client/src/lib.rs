//! We Are Hunted API client
//!
//! This crate wraps the We Are Hunted music-discovery API:
//! - Track suggestions from seed artists or free text
//! - Artist and single charts, by genre or by curator
//! - Artist ID lookup
//!
//! # Example
//!
//! ```rust,no_run
//! use wearehunted_client::{ChartPeriod, ChartType, HuntedClient, Options, Provider, SuggestRequest};
//! use wearehunted_shared_config::HuntedConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HuntedClient::new(&HuntedConfig::default())?;
//!
//! // Suggestions seeded by an artist, with Spotify links
//! let request = SuggestRequest::new().name("Shakira").provider(Provider::Spotify).count(5);
//! for track in client.suggest(request).await? {
//!     println!("{}: {:?}", track.artist, track.link(Provider::Spotify));
//! }
//!
//! // This week's singles chart
//! let chart = client
//!     .chart(Options::new().with("type", ChartType::Singles).with("period", ChartPeriod::Week))
//!     .await?;
//! println!("{} entries", chart.len());
//!
//! // Artist IDs, sorted by name
//! for artist in client.artist(&["Shakira", "Broken Bells"]).await? {
//!     println!("{} => {}", artist.name, artist.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! [`HuntedClient::from_env`] reads `WEAREHUNTED_URL`, `WEAREHUNTED_TIMEOUT`,
//! `WEAREHUNTED_CONNECT_TIMEOUT` and `WEAREHUNTED_USER_AGENT`.

mod artist;
mod chart;
mod client;
mod error;
mod models;
mod query;
mod response;

pub use artist::{lookup_options, pair_artists};
pub use chart::{build_chart_path, ChartPeriod, ChartType};
pub use client::HuntedClient;
pub use error::{ApiErrorKind, HuntedError, HuntedResult, ResponseDetails};
pub use models::{ArtistMatch, Provider, SuggestRequest, Track};
pub use query::{decode, encode, escape, OptionValue, Options};
pub use response::{classify, parse_body, ResponseBody};
