//! `OmdbError` - error kinds surfaced by the client.

use std::num::ParseIntError;

use crate::types::Film;

/// Errors returned by [`OmdbClient`](crate::OmdbClient) operations.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum OmdbError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("could not decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The API answered with `"Response": "False"`.
    #[error("{message}")]
    Api {
        /// Message taken from the `Error` field of the response.
        message: String,
    },

    /// A numeric field of an otherwise valid response failed to parse.
    ///
    /// For lookups, `partial` holds the film with every other field set.
    #[error("could not parse {field}: {source}")]
    FieldParse {
        /// Name of the offending field.
        field: &'static str,
        /// Underlying integer parse error.
        #[source]
        source: ParseIntError,
        /// Partially populated film (lookup only).
        partial: Option<Box<Film>>,
    },

    /// The client could not be constructed.
    #[error("invalid client configuration: {0}")]
    Builder(String),
}

impl OmdbError {
    /// Returns the partially populated film of a lookup year-parse failure.
    #[must_use]
    pub fn partial_film(&self) -> Option<&Film> {
        match self {
            Self::FieldParse {
                partial: Some(film),
                ..
            } => Some(&**film),
            _ => None,
        }
    }

    /// Consumes the error and returns the partial film, if any.
    #[must_use]
    pub fn into_partial_film(self) -> Option<Film> {
        match self {
            Self::FieldParse {
                partial: Some(film),
                ..
            } => Some(*film),
            _ => None,
        }
    }

    /// Whether this is an API error reporting that nothing matched.
    ///
    /// OMDb answers misses with messages such as `Movie not found!` or
    /// `Incorrect IMDb ID.`; only the former is treated as "not found".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { message } if message.to_ascii_lowercase().contains("not found"))
    }
}

/// Result type alias using [`OmdbError`].
pub type Result<T> = std::result::Result<T, OmdbError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn year_error() -> ParseIntError {
        "N/A".parse::<i32>().unwrap_err()
    }

    #[test]
    fn test_api_error_display_is_message() {
        // Arrange
        let err = OmdbError::Api {
            message: String::from("Movie not found"),
        };

        // Act & Assert
        assert_eq!(err.to_string(), "Movie not found");
    }

    #[test]
    fn test_field_parse_display() {
        // Arrange
        let err = OmdbError::FieldParse {
            field: "year",
            source: year_error(),
            partial: None,
        };

        // Act & Assert
        assert!(err.to_string().starts_with("could not parse year: "));
    }

    #[test]
    fn test_partial_film_is_exposed() {
        // Arrange
        let film = Film {
            title: String::from("Star Wars"),
            year: 0,
            genre: String::from("Sci-Fi"),
            poster: String::from("N/A"),
        };
        let err = OmdbError::FieldParse {
            field: "year",
            source: year_error(),
            partial: Some(Box::new(film.clone())),
        };

        // Act & Assert
        assert_eq!(err.partial_film(), Some(&film));
        assert_eq!(err.into_partial_film(), Some(film));
    }

    #[test]
    fn test_partial_film_absent_for_other_kinds() {
        // Arrange
        let err = OmdbError::Api {
            message: String::from("Invalid API key!"),
        };

        // Act & Assert
        assert!(err.partial_film().is_none());
        assert!(err.into_partial_film().is_none());
    }

    #[test]
    fn test_is_not_found() {
        // Arrange
        let miss = OmdbError::Api {
            message: String::from("Movie not found!"),
        };
        let bad_key = OmdbError::Api {
            message: String::from("Invalid API key!"),
        };

        // Act & Assert
        assert!(miss.is_not_found());
        assert!(!bad_key.is_not_found());
        assert!(!OmdbError::Builder(String::from("x")).is_not_found());
    }
}
