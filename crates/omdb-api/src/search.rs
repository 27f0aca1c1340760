//! Title search (`?s=<query>`) and page-by-page iteration.

use tracing::instrument;

use crate::api::LocalOmdbApi;
use crate::envelope::{ResponseFlag, SearchEntry, SearchEnvelope};
use crate::error::{OmdbError, Result};
use crate::types::{SearchOptions, SearchPage, SearchResult, YEAR_SENTINEL};

/// Number of results OMDb returns per search page.
pub const PAGE_SIZE: u64 = 10;

/// Highest `page` value OMDb accepts.
pub const MAX_PAGE: u32 = 100;

/// Query pairs for a search request, after the API key.
///
/// Order is fixed: `s`, then `y`, then `type`, then `page`.
pub(crate) fn search_query(
    query: &str,
    options: Option<&SearchOptions>,
    page: u32,
) -> Vec<(&'static str, String)> {
    let mut pairs: Vec<(&'static str, String)> = vec![("s", String::from(query))];
    if let Some(opts) = options {
        if let Some(year) = opts.year_filter() {
            pairs.push(("y", year.to_string()));
        }
        if let Some(kind) = opts.kind_filter() {
            pairs.push(("type", String::from(kind)));
        }
    }
    pairs.push(("page", page.to_string()));
    pairs
}

/// Decodes a search response body into one [`SearchPage`].
pub(crate) fn decode_search_page(body: &str, page: u32) -> Result<SearchPage> {
    let envelope: SearchEnvelope = serde_json::from_str(body).map_err(OmdbError::Decode)?;
    page_from_envelope(envelope, page)
}

/// Maps a search envelope to a [`SearchPage`].
///
/// The error message is passed through verbatim.
pub(crate) fn page_from_envelope(envelope: SearchEnvelope, page: u32) -> Result<SearchPage> {
    if envelope.response != ResponseFlag::True {
        return Err(OmdbError::Api {
            message: envelope.error,
        });
    }

    let results = envelope
        .search
        .unwrap_or_default()
        .into_iter()
        .map(result_from_entry)
        .collect();

    Ok(SearchPage {
        page,
        total_results: envelope.total_results,
        results,
    })
}

/// Maps one entry, substituting [`YEAR_SENTINEL`] for an unparsable year.
fn result_from_entry(entry: SearchEntry) -> SearchResult {
    let year = entry.year.parse::<i32>().unwrap_or_else(|_| {
        tracing::debug!(year = %entry.year, id = %entry.imdb_id, "Unparsable year in search entry");
        YEAR_SENTINEL
    });
    SearchResult {
        title: entry.title,
        year,
        id: entry.imdb_id,
        kind: entry.kind,
        poster: entry.poster,
    }
}

/// Number of pages needed for `total_results`, capped at [`MAX_PAGE`].
fn page_count(total_results: u64) -> u32 {
    u32::try_from(total_results.div_ceil(PAGE_SIZE))
        .unwrap_or(u32::MAX)
        .min(MAX_PAGE)
}

/// Lazily fetches search results one page at a time.
///
/// Stops after the last page implied by `totalResults`, after an empty
/// page, or after the first error. Once exhausted it stays exhausted.
/// OMDb serves at most [`MAX_PAGE`] pages, so results past the first
/// 1000 are never requested.
#[derive(Debug)]
pub struct SearchPages<'a, A> {
    api: &'a A,
    query: String,
    options: Option<SearchOptions>,
    next: u32,
    last: Option<u32>,
    done: bool,
}

impl<'a, A: LocalOmdbApi> SearchPages<'a, A> {
    /// Creates a pager starting at page 1. Nothing is fetched until
    /// [`next_page`](Self::next_page) is called.
    pub fn new(api: &'a A, query: impl Into<String>, options: Option<SearchOptions>) -> Self {
        Self {
            api,
            query: query.into(),
            options,
            next: 1,
            last: None,
            done: false,
        }
    }

    /// Whether no further pages will be fetched.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.done
    }

    /// Fetches the next page. Returns `None` once exhausted.
    #[instrument(skip_all, fields(page = self.next))]
    pub async fn next_page(&mut self) -> Option<Result<SearchPage>> {
        if self.done {
            return None;
        }
        if let Some(last) = self.last
            && self.next > last
        {
            self.done = true;
            return None;
        }

        let page = self.next;
        let result = self
            .api
            .search_page(&self.query, self.options.as_ref(), page)
            .await;

        match &result {
            Ok(fetched) => {
                let last = page_count(fetched.total_results);
                self.last = Some(last);
                match page.checked_add(1) {
                    Some(next) if !fetched.results.is_empty() => self.next = next,
                    _ => self.done = true,
                }
                tracing::debug!(
                    page,
                    last_page = last,
                    fetched = fetched.results.len(),
                    "Search page completed"
                );
            }
            Err(e) => {
                tracing::debug!(page, error = %e, "Search page failed");
                self.done = true;
            }
        }
        Some(result)
    }

    /// Drains the remaining pages into one list.
    ///
    /// # Errors
    ///
    /// Returns the first error any page request produces.
    pub async fn collect_all(mut self) -> Result<Vec<SearchResult>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await {
            all.extend(page?.results);
        }
        Ok(all)
    }
}
