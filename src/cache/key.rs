//! Cache Key Module
//!
//! Derives a deterministic cache key from a search request.

use crate::models::SearchRequest;

/// Separator placed between key components.
///
/// A field value containing this character can collide with a different
/// request. Values are not escaped.
pub const KEY_DELIMITER: char = '|';

// == Cache Key ==
/// Builds the cache key for a request.
///
/// Components in order: query, category, sorted tags, price range,
/// free flag, limit, offset, sort field, sort order. Absent fields
/// render as the empty string.
pub fn cache_key(request: &SearchRequest) -> String {
    let tags = request
        .tags
        .as_ref()
        .map(|tags| {
            let mut sorted: Vec<&str> = tags.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            sorted.join(",")
        })
        .unwrap_or_default();

    let components = [
        request.query.clone().unwrap_or_default(),
        request.category.clone().unwrap_or_default(),
        tags,
        render(&request.price_range),
        render(&request.is_free),
        render(&request.limit),
        render(&request.offset),
        request.sort_by.clone().unwrap_or_default(),
        render(&request.sort_order),
    ];

    components.join(&KEY_DELIMITER.to_string())
}

fn render<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
