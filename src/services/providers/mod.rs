use tracing::instrument;

/// Remote data access seams
///
/// The core never talks to reqwest directly. It goes through `HttpClient`, a
/// "GET this path, give me JSON" capability, and `FetchAction`, which turns one
/// category request into a sequence of items. Both are trait objects so tests and
/// alternative backends can be dropped in.
use crate::{
    error::AppResult,
    models::{FetchRequest, Item, ResultsPage},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// HTTP collaborator used by every fetch
///
/// Base URL and credentials are the implementor's concern; callers pass only the
/// resource path and query.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a GET against `path` and return the parsed JSON body
    async fn get_json(&self, path: &str) -> AppResult<serde_json::Value>;
}

/// The async operation bound to a category descriptor
#[async_trait::async_trait]
pub trait FetchAction: Send + Sync {
    /// Perform the request and return the items it produced
    async fn execute(&self, http: &dyn HttpClient, request: &FetchRequest)
        -> AppResult<Vec<Item>>;

    /// Action name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetches a paged list endpoint and yields its `results` array
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultsFetch;

#[async_trait::async_trait]
impl FetchAction for ResultsFetch {
    #[instrument(skip(self, http, request), fields(url = %request.url, first_page = request.first_page))]
    async fn execute(
        &self,
        http: &dyn HttpClient,
        request: &FetchRequest,
    ) -> AppResult<Vec<Item>> {
        let body = http.get_json(&request.url).await?;
        let page = ResultsPage::from_value(body)?;

        tracing::debug!(
            page = ?page.page,
            total_pages = ?page.total_pages,
            items = page.results.len(),
            "Results page decoded"
        );

        Ok(page.results)
    }

    fn name(&self) -> &'static str {
        "results"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ItemId;
    use serde_json::json;

    fn request(url: &str) -> FetchRequest {
        FetchRequest {
            url: url.to_string(),
            first_page: true,
        }
    }

    #[tokio::test]
    async fn test_results_fetch_returns_items() {
        let mut http = MockHttpClient::new();
        http.expect_get_json()
            .withf(|path: &str| path == "/trending/movie/week")
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "page": 1,
                    "results": [
                        { "id": 1, "title": "Dune" },
                        { "id": 2, "title": "Arrival" }
                    ]
                }))
            });

        let items = ResultsFetch
            .execute(&http, &request("/trending/movie/week"))
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, ItemId::Numeric(2));
    }

    #[tokio::test]
    async fn test_results_fetch_rejects_missing_results() {
        let mut http = MockHttpClient::new();
        http.expect_get_json()
            .returning(|_| Ok(json!({ "success": false, "status_code": 7 })));

        let err = ResultsFetch
            .execute(&http, &request("/movie/upcoming"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_results_fetch_propagates_network_error() {
        let mut http = MockHttpClient::new();
        http.expect_get_json()
            .returning(|_| Err(AppError::Network("API returned status 503".to_string())));

        let err = ResultsFetch
            .execute(&http, &request("/movie/upcoming"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Network(_)));
    }
}
