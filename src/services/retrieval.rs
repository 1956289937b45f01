use std::sync::Arc;
use tracing::{instrument, Instrument};

use crate::{
    db::ResultCache,
    error::{AppError, AppResult},
    models::{CategoryDescriptor, Domain, FetchRequest, RowDescriptor, SelectorKey},
    services::{
        providers::{FetchAction, HttpClient, ResultsFetch},
        registry::{CategoryRegistry, SEARCH_SELECTOR},
    },
};

/// Turns (domain, genre, page) requests into background fetches
///
/// Every call returns as soon as the fetch is dispatched. Results land in the shared
/// `ResultCache` under the descriptor's selector key; a failed fetch is recorded there
/// and never returned to the caller. Must be used from within a Tokio runtime.
#[derive(Clone)]
pub struct RetrievalService {
    registry: Arc<CategoryRegistry>,
    http: Arc<dyn HttpClient>,
    cache: ResultCache,
}

impl RetrievalService {
    pub fn new(registry: Arc<CategoryRegistry>, http: Arc<dyn HttpClient>, cache: ResultCache) -> Self {
        Self {
            registry,
            http,
            cache,
        }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Fetches one page of a single category
    ///
    /// A later call for the same genre replaces the entry's data with the new page;
    /// pages are never merged.
    #[instrument(skip(self))]
    pub async fn retrieve_category(
        &self,
        domain: Domain,
        genre: &str,
        page: u32,
    ) -> AppResult<CategoryDescriptor> {
        if page == 0 {
            return Err(AppError::InvalidInput("pages start at 1".to_string()));
        }

        let descriptor = self.registry.lookup(domain, genre)?.clone();
        let request = FetchRequest {
            url: with_page(&descriptor.url_template, page),
            first_page: false,
        };

        self.dispatch(
            &descriptor.selector_key,
            Arc::clone(&descriptor.fetch_action),
            request,
        )
        .await;

        Ok(descriptor)
    }

    /// Fetches the first page of every category in `domain`
    ///
    /// Dispatches in registry order. Each category settles independently; one failing
    /// does not affect the others.
    #[instrument(skip(self))]
    pub async fn retrieve_all(&self, domain: Domain) -> AppResult<Vec<RowDescriptor>> {
        let descriptors = self.registry.list_all(domain)?;
        let mut rows = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let request = FetchRequest {
                url: descriptor.url_template.clone(),
                first_page: true,
            };
            self.dispatch(
                &descriptor.selector_key,
                Arc::clone(&descriptor.fetch_action),
                request,
            )
            .await;
            rows.push(descriptor.row());
        }

        tracing::info!(domain = %domain, rows = rows.len(), "Domain retrieval dispatched");

        Ok(rows)
    }

    /// Runs a multi-search, writing the results under the `search` key
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, page: u32) -> AppResult<SelectorKey> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }
        if page == 0 {
            return Err(AppError::InvalidInput("pages start at 1".to_string()));
        }

        let key = SelectorKey::new(SEARCH_SELECTOR);
        let request = FetchRequest {
            url: with_page(&CategoryRegistry::search_template(query.trim()), page),
            first_page: page == 1,
        };

        self.dispatch(&key, Arc::new(ResultsFetch), request).await;

        Ok(key)
    }

    /// Marks the key loading, then runs the action in a detached task
    async fn dispatch(
        &self,
        key: &SelectorKey,
        action: Arc<dyn FetchAction>,
        request: FetchRequest,
    ) {
        let ticket = self.cache.begin(key).await;
        let http = Arc::clone(&self.http);
        let cache = self.cache.clone();

        let span = tracing::info_span!(
            "fetch",
            selector_key = %key,
            request_id = %ticket.request_id(),
            action = action.name(),
        );

        tokio::spawn(
            async move {
                let outcome = action.execute(http.as_ref(), &request).await;

                match &outcome {
                    Ok(items) => {
                        tracing::info!(url = %request.url, items = items.len(), "Category fetched");
                    }
                    Err(e) => {
                        tracing::error!(url = %request.url, error = %e, "Category fetch failed");
                    }
                }

                cache.resolve(&ticket, outcome).await;
            }
            .instrument(span),
        );
    }
}

/// Appends the `page` query parameter to a registry template
pub fn with_page(url_template: &str, page: u32) -> String {
    let separator = if url_template.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", url_template, separator, page)
}
