use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::{AppError, AppResult};

pub mod category;

pub use category::{CategoryDescriptor, FetchRequest, RowDescriptor, SelectorKey};

/// Stable identity of a media record, numeric for TMDB but kept open for other sources
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(u64),
    Text(String),
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Numeric(id) => write!(f, "{}", id),
            ItemId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        ItemId::Numeric(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Text(id.to_string())
    }
}

/// A movie or series record as returned by the metadata API
///
/// Only the fields below are interpreted; anything else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl Item {
    /// Creates an item carrying only a numeric identity
    pub fn new(id: u64) -> Self {
        Self::with_id(id.into())
    }

    pub fn with_id(id: ItemId) -> Self {
        Self {
            id,
            title: None,
            name: None,
            original_name: None,
            overview: None,
            backdrop_path: None,
            poster_path: None,
            release_date: None,
            first_air_date: None,
            vote_average: None,
            genre_ids: Vec::new(),
        }
    }
}

/// Paged list envelope shared by the discover, trending and search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPage {
    pub results: Vec<Item>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

impl ResultsPage {
    /// Parses a response body, rejecting anything that is not an object with `results`
    pub fn from_value(value: serde_json::Value) -> AppResult<Self> {
        if !value.is_object() {
            return Err(AppError::MalformedResponse(
                "expected a JSON object at the top level".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| AppError::MalformedResponse(e.to_string()))
    }
}

/// Top-level content grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Movies,
    Series,
    Popular,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Movies, Domain::Series, Domain::Popular];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Movies => "movies",
            Domain::Series => "series",
            Domain::Popular => "popular",
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = AppError;

    /// Accepts the route segments used by the browse pages as well as the canonical names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "browse" | "movies" => Ok(Domain::Movies),
            "series" | "tvseries" => Ok(Domain::Series),
            "popular" => Ok(Domain::Popular),
            other => Err(AppError::NotFound(format!("unknown domain '{}'", other))),
        }
    }
}
