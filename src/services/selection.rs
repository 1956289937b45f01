use rand::Rng;

use crate::models::Item;

/// Marker appended to shortened text
pub const ELLIPSIS: char = '…';

/// Picks a uniformly random element, or `None` when there is nothing to pick from
pub fn pick_random<T>(items: &[T]) -> Option<&T> {
    pick_random_with(items, &mut rand::thread_rng())
}

/// `pick_random` with a caller-supplied generator
///
/// The index is always drawn from `0..len`.
pub fn pick_random_with<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..items.len());
    items.get(index)
}

/// Display name with the title → name → original name fallback
pub fn resolve_title(item: &Item) -> Option<&str> {
    [&item.title, &item.name, &item.original_name]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|candidate| !candidate.is_empty())
}

/// Shortens `text` to at most `max_len` characters, ending with an ellipsis when cut
///
/// Lengths count Unicode scalar values. `max_len == 1` yields only the ellipsis and
/// `max_len == 0` yields an empty string.
pub fn truncate(text: Option<&str>, max_len: usize) -> Option<String> {
    let text = text?;

    if text.chars().count() <= max_len {
        return Some(text.to_string());
    }

    if max_len == 0 {
        return Some(String::new());
    }

    let mut shortened: String = text.chars().take(max_len - 1).collect();
    shortened.push(ELLIPSIS);
    Some(shortened)
}

/// Year part of a `YYYY-MM-DD` date
pub fn year_only(date: &str) -> Option<&str> {
    date.get(..4)
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Full image URL for an API image path, or the fallback when the item has none
pub fn image_url(base_url: &str, fallback_url: &str, path: Option<&str>) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}{}", base_url.trim_end_matches('/'), path),
        None => fallback_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn titled(id: u64, title: Option<&str>, name: Option<&str>, original: Option<&str>) -> Item {
        Item {
            title: title.map(str::to_string),
            name: name.map(str::to_string),
            original_name: original.map(str::to_string),
            ..Item::new(id)
        }
    }

    #[test]
    fn test_pick_random_empty() {
        let items: Vec<Item> = Vec::new();
        assert!(pick_random(&items).is_none());
    }

    #[test]
    fn test_pick_random_single() {
        let items = vec![Item::new(1)];
        for _ in 0..100 {
            assert_eq!(pick_random(&items), Some(&items[0]));
        }
    }

    #[test]
    fn test_pick_random_always_member() {
        let items: Vec<Item> = (1..=5).map(Item::new).collect();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let picked = pick_random_with(&items, &mut rng).unwrap();
            assert!(items.contains(picked));
        }
    }

    #[test]
    fn test_pick_random_reaches_both_ends() {
        let items: Vec<u32> = vec![0, 1, 2];
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];

        for _ in 0..500 {
            seen[*pick_random_with(&items, &mut rng).unwrap() as usize] = true;
        }

        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_resolve_title_precedence() {
        assert_eq!(resolve_title(&titled(1, Some("A"), Some("B"), None)), Some("A"));
        assert_eq!(resolve_title(&titled(1, None, Some("B"), Some("C"))), Some("B"));
        assert_eq!(resolve_title(&titled(1, None, None, Some("C"))), Some("C"));
        assert_eq!(resolve_title(&Item::new(1)), None);
    }

    #[test]
    fn test_resolve_title_skips_empty() {
        assert_eq!(resolve_title(&titled(1, Some(""), Some("B"), None)), Some("B"));
        assert_eq!(resolve_title(&titled(1, Some(""), Some(""), Some(""))), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(Some("Hello World"), 5), Some("Hell…".to_string()));
        assert_eq!(truncate(Some("Hi"), 5), Some("Hi".to_string()));
        assert_eq!(truncate(Some("Hello"), 5), Some("Hello".to_string()));
        assert_eq!(truncate(None, 5), None);
    }

    #[test]
    fn test_truncate_tiny_limits() {
        assert_eq!(truncate(Some("Hello"), 1), Some("…".to_string()));
        assert_eq!(truncate(Some("Hello"), 0), Some(String::new()));
        assert_eq!(truncate(Some(""), 0), Some(String::new()));
        assert_eq!(truncate(Some("H"), 1), Some("H".to_string()));
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate(Some("Amélie Poulain"), 4), Some("Amé…".to_string()));
    }

    #[test]
    fn test_year_only() {
        assert_eq!(year_only("1999-10-15"), Some("1999"));
        assert_eq!(year_only("199"), None);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("movies"), "Movies");
        assert_eq!(capitalize_first("émile"), "Émile");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_image_url() {
        let base = "https://image.tmdb.org/t/p/original";
        let fallback = "https://cdn.example/fallback.png";

        assert_eq!(
            image_url(base, fallback, Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert_eq!(image_url(base, fallback, None), fallback);
        assert_eq!(image_url(base, fallback, Some("")), fallback);
    }
}
