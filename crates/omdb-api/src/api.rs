//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::Result;
use crate::types::{Film, SearchOptions, SearchPage, SearchResult};

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Fetches a single film by IMDb identifier.
    ///
    /// # Errors
    ///
    /// - [`OmdbError::Transport`](crate::OmdbError::Transport) if the request fails.
    /// - [`OmdbError::Decode`](crate::OmdbError::Decode) if the body is not valid JSON.
    /// - [`OmdbError::Api`](crate::OmdbError::Api) if the API reports a failure
    ///   (one trailing period is removed from the message).
    /// - [`OmdbError::FieldParse`](crate::OmdbError::FieldParse) if the year is not
    ///   an integer; the rest of the film is available via
    ///   [`OmdbError::partial_film`](crate::OmdbError::partial_film).
    async fn fetch(&self, id: &str) -> Result<Film>;

    /// Searches by title and returns the first page of results.
    ///
    /// Entries whose year is not an integer get
    /// [`YEAR_SENTINEL`](crate::YEAR_SENTINEL).
    ///
    /// # Errors
    ///
    /// Returns `Transport`, `Decode`, or `Api` (message verbatim) errors.
    async fn search(
        &self,
        query: &str,
        options: Option<&SearchOptions>,
    ) -> Result<Vec<SearchResult>>;

    /// Fetches one page (1-based) of search results.
    ///
    /// # Errors
    ///
    /// Same as [`search`](Self::search).
    async fn search_page(
        &self,
        query: &str,
        options: Option<&SearchOptions>,
        page: u32,
    ) -> Result<SearchPage>;
}
