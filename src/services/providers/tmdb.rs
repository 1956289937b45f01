/// TMDB (The Movie Database) HTTP client
///
/// Owns the base URL and credentials so the registry templates stay key-free.
/// Every request gets `api_key` and `language` appended to its query string.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::HttpClient,
};
use reqwest::Client as ReqwestClient;

#[derive(Clone)]
pub struct TmdbClient {
    http_client: ReqwestClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: ReqwestClient::new(),
            api_key,
            api_url,
            language,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.language.clone(),
        )
    }

    /// Absolute URL for a registry path
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl HttpClient for TmdbClient {
    async fn get_json(&self, path: &str) -> AppResult<serde_json::Value> {
        let url = self.endpoint(path);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                path = %path,
                status = %status,
                body = %body,
                "TMDB request failed"
            );
            return Err(AppError::Network(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::MalformedResponse(format!("response body is not JSON: {}", e))
        })
    }
}
