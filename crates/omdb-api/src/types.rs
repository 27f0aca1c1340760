//! Public result types and search options.

/// Full information about a film, as returned by `fetch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Film {
    /// Title.
    pub title: String,
    /// Release year (0 when the API value could not be parsed).
    pub year: i32,
    /// Comma-separated genre list (e.g. "Action, Adventure, Fantasy").
    pub genre: String,
    /// Poster image URL, or "N/A".
    pub poster: String,
}

/// Partial information about a film, as returned by `search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Title.
    pub title: String,
    /// Release year, or [`YEAR_SENTINEL`] when the API value is not a plain integer.
    pub year: i32,
    /// IMDb identifier (e.g. "tt0076759").
    pub id: String,
    /// Category ("movie", "series", "episode", ...).
    pub kind: String,
    /// Poster image URL, or "N/A".
    pub poster: String,
}

/// Year substituted for search entries whose year does not parse
/// (e.g. the "2001–2004" ranges OMDb returns for series).
pub const YEAR_SENTINEL: i32 = 3000;

/// Filters for `search`.
///
/// A year of `0` and an empty type are treated the same as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Filter by year of release.
    pub year: Option<i32>,
    /// Filter by category ("movie", "series", "episode").
    pub kind: Option<String>,
}

impl SearchOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the type filter.
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Year filter, if set and non-zero.
    pub(crate) fn year_filter(&self) -> Option<i32> {
        self.year.filter(|y| *y != 0)
    }

    /// Type filter, if set and non-empty.
    pub(crate) fn kind_filter(&self) -> Option<&str> {
        self.kind.as_deref().filter(|k| !k.is_empty())
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// 1-based page number.
    pub page: u32,
    /// Total number of matches reported by the API across all pages.
    pub total_results: u64,
    /// Results on this page, in API order.
    pub results: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_options_default_has_no_filters() {
        // Arrange & Act
        let opts = SearchOptions::new();

        // Assert
        assert_eq!(opts.year_filter(), None);
        assert_eq!(opts.kind_filter(), None);
    }

    #[test]
    fn test_search_options_zero_and_empty_are_unset() {
        // Arrange & Act
        let opts = SearchOptions::new().year(0).kind("");

        // Assert
        assert_eq!(opts.year_filter(), None);
        assert_eq!(opts.kind_filter(), None);
    }

    #[test]
    fn test_search_options_filters() {
        // Arrange & Act
        let opts = SearchOptions::new().year(2015).kind("movie");

        // Assert
        assert_eq!(opts.year_filter(), Some(2015));
        assert_eq!(opts.kind_filter(), Some("movie"));
    }
}
