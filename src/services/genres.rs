/// TMDB genre ids for movies and series
const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
    (10759, "Action & Adventure"),
    (10762, "Kids"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
];

/// How many genres a card shows
pub const MAX_GENRES: usize = 3;

pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Names for the first three genre ids; unknown ids are dropped, not replaced
pub fn genre_names(ids: &[u32]) -> Vec<&'static str> {
    ids.iter()
        .take(MAX_GENRES)
        .filter_map(|id| genre_name(*id))
        .collect()
}
