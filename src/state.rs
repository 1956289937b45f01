use chrono::Utc;
use std::sync::Arc;

use crate::{
    config::Config,
    db::ResultCache,
    error::AppResult,
    models::{Domain, Item, SelectorKey},
    services::{
        favourites::FavouritesStore,
        providers::{HttpClient, TmdbClient},
        registry::CategoryRegistry,
        retrieval::RetrievalService,
        selection,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub retrieval: RetrievalService,
    pub favourites: FavouritesStore,
    image_base_url: String,
    fallback_image_url: String,
}

impl AppState {
    /// Wires the TMDB client and default catalogue from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let registry = CategoryRegistry::tmdb(Utc::now().date_naive(), &config.region)?;
        let http: Arc<dyn HttpClient> = Arc::new(TmdbClient::from_config(config));

        Ok(Self::new(registry, http, config))
    }

    /// Builds state around an explicit registry and HTTP collaborator
    pub fn new(registry: CategoryRegistry, http: Arc<dyn HttpClient>, config: &Config) -> Self {
        Self {
            retrieval: RetrievalService::new(Arc::new(registry), http, ResultCache::new()),
            favourites: FavouritesStore::new(),
            image_base_url: config.image_base_url.clone(),
            fallback_image_url: config.fallback_image_url.clone(),
        }
    }

    /// Category whose items headline the banner for `domain`
    pub fn featured_selector(domain: Domain) -> SelectorKey {
        match domain {
            Domain::Movies => SelectorKey::from("movies.trending"),
            Domain::Series => SelectorKey::from("series.netflix"),
            Domain::Popular => SelectorKey::from("popular.trending"),
        }
    }

    /// Random item from the domain's banner category
    ///
    /// `None` unless the category has finished loading with at least one item.
    pub async fn featured(&self, domain: Domain) -> Option<Item> {
        let entry = self
            .retrieval
            .cache()
            .get(&Self::featured_selector(domain))
            .await?;

        if entry.loading || entry.error {
            return None;
        }

        selection::pick_random(&entry.data).cloned()
    }

    /// Backdrop URL for an item, falling back to the placeholder image
    pub fn backdrop_url(&self, item: &Item) -> String {
        selection::image_url(
            &self.image_base_url,
            &self.fallback_image_url,
            item.backdrop_path.as_deref(),
        )
    }
}
