//! Client library for the OMDb movie metadata API.
//!
//! Two endpoints are covered: lookup by IMDb identifier and search by title.
//!
//! ```no_run
//! use omdb_api::{LocalOmdbApi, OmdbClient, SearchOptions};
//!
//! # async fn demo() -> omdb_api::Result<()> {
//! let client = OmdbClient::builder().api_key("your-key").build()?;
//! let film = client.fetch("tt0076759").await?;
//! let hits = client
//!     .search("star wars", Some(&SearchOptions::new().kind("movie")))
//!     .await?;
//! # let _ = (film, hits);
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod envelope;
mod error;
mod lookup;
mod search;
mod types;

pub use api::{LocalOmdbApi, OmdbApi};
pub use client::{OmdbClient, OmdbClientBuilder};
pub use error::{OmdbError, Result};
pub use search::{MAX_PAGE, PAGE_SIZE, SearchPages};
pub use types::{Film, SearchOptions, SearchPage, SearchResult, YEAR_SENTINEL};
