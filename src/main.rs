use catalog_core::{
    config::Config,
    models::Domain,
    services::{genres, selection},
    AppState,
};
use tracing_subscriber::EnvFilter;

const OVERVIEW_PREVIEW_LEN: usize = 150;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let domain: Domain = config.preview_domain.parse()?;
    let state = AppState::from_config(&config)?;

    let rows = state.retrieval.retrieve_all(domain).await?;

    for row in &rows {
        match state.retrieval.cache().wait_settled(&row.selector_key).await {
            Some(entry) if !entry.error => {
                tracing::info!(row = %row.title, items = entry.data.len(), "Row loaded");
            }
            _ => tracing::warn!(row = %row.title, "Row failed to load"),
        }
    }

    match state.featured(domain).await {
        Some(item) => {
            let release = item.release_date.as_deref().or(item.first_air_date.as_deref());
            tracing::info!(
                title = selection::resolve_title(&item).unwrap_or("Untitled"),
                year = release.and_then(selection::year_only).unwrap_or("-"),
                genres = ?genres::genre_names(&item.genre_ids),
                overview = %selection::truncate(item.overview.as_deref(), OVERVIEW_PREVIEW_LEN).unwrap_or_default(),
                backdrop = %state.backdrop_url(&item),
                "Featured {}",
                selection::capitalize_first(domain.as_str())
            );
        }
        None => tracing::warn!(domain = %domain, "No content available"),
    }

    Ok(())
}
