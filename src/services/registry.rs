use chrono::{Months, NaiveDate};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    error::{AppError, AppResult},
    models::{CategoryDescriptor, Domain, SelectorKey},
    services::providers::{FetchAction, ResultsFetch},
};

/// Selector key the multi-search results are written under
pub const SEARCH_SELECTOR: &str = "search";

/// Immutable table of category descriptors, one ordered list per domain
///
/// Built once at startup and shared by reference. There is no mutation API; tests
/// construct their own registry from fixture descriptors.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    tables: HashMap<Domain, Vec<CategoryDescriptor>>,
}

impl CategoryRegistry {
    /// Builds a registry, rejecting duplicate domains or duplicate genres within a domain
    pub fn new<I>(tables: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (Domain, Vec<CategoryDescriptor>)>,
    {
        let mut map = HashMap::new();

        for (domain, descriptors) in tables {
            let mut genres = HashSet::new();
            for descriptor in &descriptors {
                if !genres.insert(descriptor.genre.as_str()) {
                    return Err(AppError::InvalidInput(format!(
                        "duplicate genre '{}' in {}",
                        descriptor.genre, domain
                    )));
                }
            }

            if map.insert(domain, descriptors).is_some() {
                return Err(AppError::InvalidInput(format!(
                    "domain {} registered twice",
                    domain
                )));
            }
        }

        Ok(Self { tables: map })
    }

    /// Finds the descriptor for `genre` in `domain`
    pub fn lookup(&self, domain: Domain, genre: &str) -> AppResult<&CategoryDescriptor> {
        self.list_all(domain)?
            .iter()
            .find(|descriptor| descriptor.genre == genre)
            .ok_or_else(|| AppError::NotFound(format!("genre '{}' in {}", genre, domain)))
    }

    /// All descriptors of `domain`, in registry order
    pub fn list_all(&self, domain: Domain) -> AppResult<&[CategoryDescriptor]> {
        self.tables
            .get(&domain)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::NotFound(format!("no categories registered for {}", domain)))
    }

    /// The TMDB catalogue used by the browse pages
    ///
    /// `today` anchors the "new releases" window; `region` feeds the top rated list.
    pub fn tmdb(today: NaiveDate, region: &str) -> AppResult<Self> {
        let action: Arc<dyn FetchAction> = Arc::new(ResultsFetch);
        let one_month_ago = today
            .checked_sub_months(Months::new(1))
            .unwrap_or(today)
            .format("%Y-%m-%d");

        let discover_movies = |genre_id: u32| {
            format!("/discover/movie?with_genres={}&sort_by=popularity.desc", genre_id)
        };
        let discover_series = |genre_id: u32| {
            format!("/discover/tv?with_genres={}&sort_by=popularity.desc", genre_id)
        };

        let movies = vec![
            descriptor(&action, 0, "Trending Now", "trending", "/trending/movie/week?sort_by=popularity.desc".to_string(), "movies.trending", true),
            descriptor(&action, 1, "Upcoming", "upcoming", "/movie/upcoming".to_string(), "movies.upcoming", false),
            descriptor(&action, 2, "Top Rated", "toprated", format!("/movie/top_rated?sort_by=popularity.desc&region={}", region), "movies.toprated", false),
            descriptor(&action, 3, "Action", "action", discover_movies(28), "movies.action", false),
            descriptor(&action, 4, "Adventure", "adventure", discover_movies(12), "movies.adventure", false),
            descriptor(&action, 5, "Comedy", "comedy", discover_movies(35), "movies.comedy", false),
            descriptor(&action, 6, "Horror", "horror", discover_movies(27), "movies.horror", false),
            descriptor(&action, 7, "Romance", "romance", discover_movies(10749), "movies.romance", false),
            descriptor(&action, 8, "War", "war", discover_movies(10752), "movies.war", false),
            descriptor(&action, 9, "Animation", "animation", discover_movies(16), "movies.animation", false),
        ];

        let series = vec![
            descriptor(&action, 0, "Trending Now", "trending", "/trending/tv/week?sort_by=popularity.desc".to_string(), "series.trending", false),
            descriptor(&action, 1, "Netflix Originals", "netflix", "/discover/tv?with_networks=213&sort_by=popularity.desc".to_string(), "series.netflix", true),
            descriptor(&action, 2, "Action & Adventure", "actionadventure", discover_series(10759), "series.actionadventure", false),
            descriptor(&action, 3, "Animation", "animation", discover_series(16), "series.animation", false),
            descriptor(&action, 4, "Comedy", "comedy", discover_series(35), "series.comedy", false),
            descriptor(&action, 5, "Crime", "crime", discover_series(80), "series.crime", false),
            descriptor(&action, 6, "Documentary", "documentary", discover_series(99), "series.documentary", false),
            descriptor(&action, 7, "Family", "family", discover_series(10751), "series.family", false),
            descriptor(&action, 8, "Kids", "kids", discover_series(10762), "series.kids", false),
            descriptor(&action, 9, "Sci-Fi & Fantasy", "scifi", discover_series(10765), "series.scifi", false),
        ];

        let popular = vec![
            descriptor(&action, 0, "Trending Now", "trending", "/trending/all/week?sort_by=popularity.desc".to_string(), "popular.trending", true),
            descriptor(&action, 1, "New Releases", "newreleases", format!("/discover/movie?primary_release_date.gte={}&sort_by=popularity.desc", one_month_ago), "popular.newreleases", false),
            descriptor(&action, 2, "Trending Movies", "trendingmovies", "/trending/movie/week?sort_by=popularity.desc".to_string(), "popular.trendingmovies", false),
            descriptor(&action, 3, "Trending Series", "trendingseries", "/trending/tv/week?sort_by=popularity.desc".to_string(), "popular.trendingseries", false),
            descriptor(&action, 4, "Popular Movies", "movies", "/discover/movie?sort_by=popularity.desc".to_string(), "popular.movies", false),
            descriptor(&action, 5, "Popular Series", "series", "/discover/tv?sort_by=popularity.desc".to_string(), "popular.series", false),
        ];

        Self::new([
            (Domain::Movies, movies),
            (Domain::Series, series),
            (Domain::Popular, popular),
        ])
    }

    /// Path for a multi-search over movies, series and people
    pub fn search_template(query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("/search/multi?query={}", encoded)
    }
}

fn descriptor(
    action: &Arc<dyn FetchAction>,
    id: u32,
    title: &str,
    genre: &str,
    url_template: String,
    selector_key: &str,
    is_large: bool,
) -> CategoryDescriptor {
    CategoryDescriptor {
        id,
        title: title.to_string(),
        genre: genre.to_string(),
        url_template,
        fetch_action: Arc::clone(action),
        selector_key: SelectorKey::new(selector_key),
        is_large,
    }
}
