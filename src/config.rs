use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key, appended to every request by the HTTP client
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language sent with every request
    #[serde(default = "default_language")]
    pub language: String,

    /// Region used by region-aware categories (top rated)
    #[serde(default = "default_region")]
    pub region: String,

    /// Prefix for backdrop and poster paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Image shown when an item has no backdrop
    #[serde(default = "default_fallback_image_url")]
    pub fallback_image_url: String,

    /// Domain the preview binary retrieves ("movies", "series", "popular")
    #[serde(default = "default_preview_domain")]
    pub preview_domain: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

fn default_fallback_image_url() -> String {
    "https://cdn.jsdelivr.net/gh/Th3Wall/assets-cdn/Fakeflix/Fakeflix_readme.png".to_string()
}

fn default_preview_domain() -> String {
    "movies".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Build a config from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
