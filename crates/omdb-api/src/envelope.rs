//! Raw OMDb response shapes.
//!
//! These mirror the JSON the API sends and are only used to build the
//! public types in [`crate::types`].

use serde::{Deserialize, Serialize};

/// The `Response` field. OMDb encodes it as the text "True"/"False".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum ResponseFlag {
    /// Request succeeded.
    True,
    /// Request failed; `Error` holds the reason.
    False,
    /// Missing or unrecognised value.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Body of `?i=<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct FilmEnvelope {
    pub response: ResponseFlag,
    pub error: String,
    pub title: String,
    /// Year as text (e.g. "1977").
    pub year: String,
    pub genre: String,
    pub poster: String,
}

/// Body of `?s=<query>&page=<n>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct SearchEnvelope {
    pub response: ResponseFlag,
    pub error: String,
    /// Sent as a quoted number, e.g. `"totalResults": "74"`.
    #[serde(rename = "totalResults", with = "quoted_u64")]
    pub total_results: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<SearchEntry>>,
}

/// One element of `Search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct SearchEntry {
    pub title: String,
    /// Year as text; may be a range such as "2001–2004".
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub poster: String,
}

/// (De)serialises a `u64` carried as a JSON string.
mod quoted_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
