//! Lookup by IMDb identifier (`?i=<id>`).

use crate::envelope::{FilmEnvelope, ResponseFlag};
use crate::error::{OmdbError, Result};
use crate::types::Film;

/// Query pairs for a lookup request, after the API key.
pub(crate) fn lookup_query(id: &str) -> Vec<(&'static str, String)> {
    vec![("i", String::from(id))]
}

/// Decodes a lookup response body into a [`Film`].
pub(crate) fn decode_film(body: &str) -> Result<Film> {
    let envelope: FilmEnvelope = serde_json::from_str(body).map_err(OmdbError::Decode)?;
    film_from_envelope(envelope)
}

/// Maps a lookup envelope to a [`Film`].
///
/// A failed year parse still yields the rest of the film through
/// [`OmdbError::partial_film`].
pub(crate) fn film_from_envelope(envelope: FilmEnvelope) -> Result<Film> {
    if envelope.response == ResponseFlag::False {
        return Err(OmdbError::Api {
            message: strip_trailing_period(&envelope.error),
        });
    }

    let mut film = Film {
        title: envelope.title,
        year: 0,
        genre: envelope.genre,
        poster: envelope.poster,
    };
    match envelope.year.parse::<i32>() {
        Ok(year) => {
            film.year = year;
            Ok(film)
        }
        Err(source) => {
            tracing::debug!(year = %envelope.year, title = %film.title, "Unparsable year in lookup");
            Err(OmdbError::FieldParse {
                field: "year",
                source,
                partial: Some(Box::new(film)),
            })
        }
    }
}

/// Removes a single trailing `.` ("Incorrect IMDb ID." -> "Incorrect IMDb ID").
fn strip_trailing_period(message: &str) -> String {
    String::from(message.strip_suffix('.').unwrap_or(message))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn success_envelope(year: &str) -> FilmEnvelope {
        FilmEnvelope {
            response: ResponseFlag::True,
            error: String::new(),
            title: String::from("Star Wars: Episode IV - A New Hope"),
            year: String::from(year),
            genre: String::from("Action, Adventure, Fantasy"),
            poster: String::from("https://example.com/poster.jpg"),
        }
    }

    fn failure_envelope(error: &str) -> FilmEnvelope {
        FilmEnvelope {
            response: ResponseFlag::False,
            error: String::from(error),
            ..FilmEnvelope::default()
        }
    }

    #[test]
    fn test_success_maps_all_fields() {
        // Arrange
        let envelope = success_envelope("1977");

        // Act
        let film = film_from_envelope(envelope).unwrap();

        // Assert
        assert_eq!(
            film,
            Film {
                title: String::from("Star Wars: Episode IV - A New Hope"),
                year: 1977,
                genre: String::from("Action, Adventure, Fantasy"),
                poster: String::from("https://example.com/poster.jpg"),
            }
        );
    }

    #[test]
    fn test_bad_year_returns_partial_film() {
        // Arrange
        let envelope = success_envelope("N/A");

        // Act
        let err = film_from_envelope(envelope).unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::FieldParse { field: "year", .. }));
        let partial = err.into_partial_film().unwrap();
        assert_eq!(partial.title, "Star Wars: Episode IV - A New Hope");
        assert_eq!(partial.genre, "Action, Adventure, Fantasy");
        assert_eq!(partial.poster, "https://example.com/poster.jpg");
        assert_eq!(partial.year, 0);
    }

    #[test]
    fn test_failure_strips_one_trailing_period() {
        // Arrange
        let envelope = failure_envelope("Movie not found.");

        // Act
        let err = film_from_envelope(envelope).unwrap_err();

        // Assert
        assert!(matches!(&err, OmdbError::Api { message } if message == "Movie not found"));
    }

    #[test]
    fn test_failure_strips_only_one_period() {
        // Arrange
        let envelope = failure_envelope("Wait...");

        // Act
        let err = film_from_envelope(envelope).unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "Wait..");
    }

    #[test]
    fn test_failure_without_period_is_unchanged() {
        // Arrange
        let envelope = failure_envelope("Something went wrong");

        // Act
        let err = film_from_envelope(envelope).unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "Something went wrong");
    }

    #[test]
    fn test_missing_response_flag_is_not_a_failure() {
        // Arrange
        let envelope = FilmEnvelope {
            response: ResponseFlag::Unknown,
            ..success_envelope("1999")
        };

        // Act
        let film = film_from_envelope(envelope).unwrap();

        // Assert
        assert_eq!(film.year, 1999);
    }

    #[test]
    fn test_decode_film_fixture() {
        // Arrange
        let body = include_str!("../../../fixtures/omdb/fetch_tt0076759.json");

        // Act
        let film = decode_film(body).unwrap();

        // Assert
        assert_eq!(film.title, "Star Wars: Episode IV - A New Hope");
        assert_eq!(film.year, 1977);
    }

    #[test]
    fn test_decode_film_series_year_range() {
        // Arrange
        let body = include_str!("../../../fixtures/omdb/fetch_series_year_range.json");

        // Act
        let err = decode_film(body).unwrap_err();

        // Assert
        assert_eq!(err.partial_film().unwrap().title, "Sherlock");
    }

    #[test]
    fn test_decode_film_rejects_malformed_json() {
        // Arrange
        let body = "<html>502 Bad Gateway</html>";

        // Act
        let err = decode_film(body).unwrap_err();

        // Assert
        assert!(matches!(err, OmdbError::Decode(_)));
        assert!(err.partial_film().is_none());
    }

    #[test]
    fn test_lookup_query() {
        // Arrange & Act
        let query = lookup_query("tt0076759");

        // Assert
        assert_eq!(query, vec![("i", String::from("tt0076759"))]);
    }
}
