use serde::{Deserialize, Serialize};
use std::{fmt::Display, sync::Arc};

use crate::services::providers::FetchAction;

/// Key under which a category's fetch result is stored in the result cache
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectorKey(String);

impl SelectorKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SelectorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SelectorKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// A single outbound query handed to a fetch action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Path and query, relative to the API base URL
    pub url: String,
    /// Set for a row's initial load, which carries no explicit page parameter
    pub first_page: bool,
}

/// Static description of one fetchable category within a domain
#[derive(Clone)]
pub struct CategoryDescriptor {
    pub id: u32,
    pub title: String,
    pub genre: String,
    pub url_template: String,
    pub fetch_action: Arc<dyn FetchAction>,
    pub selector_key: SelectorKey,
    pub is_large: bool,
}

impl CategoryDescriptor {
    /// Lightweight projection handed to the presentation layer
    pub fn row(&self) -> RowDescriptor {
        RowDescriptor {
            id: self.id,
            title: self.title.clone(),
            genre: self.genre.clone(),
            selector_key: self.selector_key.clone(),
            is_large: self.is_large,
        }
    }
}

impl std::fmt::Debug for CategoryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("genre", &self.genre)
            .field("url_template", &self.url_template)
            .field("fetch_action", &self.fetch_action.name())
            .field("selector_key", &self.selector_key)
            .field("is_large", &self.is_large)
            .finish()
    }
}

/// Row metadata returned when a whole domain is retrieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDescriptor {
    pub id: u32,
    pub title: String,
    pub genre: String,
    pub selector_key: SelectorKey,
    pub is_large: bool,
}
