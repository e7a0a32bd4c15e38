//! Shared test utilities for the We Are Hunted client workspace
//!
//! This crate provides a mock We Are Hunted API so client tests run
//! without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use wearehunted_test_utils::{MockHuntedServer, TrackFixture};
//!
//! #[tokio::test]
//! async fn test_with_mock() {
//!     let server = MockHuntedServer::start().await;
//!     server
//!         .mock_suggest("name=Shakira", vec![TrackFixture::new("Say Hi", "Oh Oh")])
//!         .await;
//!
//!     // Use server.url() as the client's base URL
//! }
//! ```

mod hunted;

pub use hunted::{MockHuntedServer, QueryIs, TrackFixture};
