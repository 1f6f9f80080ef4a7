//! Search domain types
//!
//! The structured search request the cache keys on, and the page of
//! results it stores.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single search result record.
///
/// The cache never inspects records; they are stored and returned as-is.
pub type SearchResult = serde_json::Value;

// == Sort Order ==
/// Direction applied to the sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

// == Price Range ==
/// Inclusive price filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", unsigned_zero(self.min), unsigned_zero(self.max))
    }
}

/// Maps `-0.0` to `0.0` so equal bounds render identically.
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

// == Search Request ==
/// Filters, pagination and sort describing one search.
///
/// Every field is optional. Tag order is not significant for caching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text query
    #[serde(default)]
    pub query: Option<String>,
    /// Category filter
    #[serde(default)]
    pub category: Option<String>,
    /// Tag filter, order-insignificant
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Inclusive price range
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    /// Free-only (`true`) or paid-only (`false`)
    #[serde(default)]
    pub is_free: Option<bool>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl SearchRequest {
    /// Creates a request for a free-text query with no other filters.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn with_free(mut self, is_free: bool) -> Self {
        self.is_free = Some(is_free);
        self
    }

    pub fn with_page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }

    /// Short human-readable label used in logs and prefetch reports.
    pub fn label(&self) -> String {
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            return format!("query '{}'", query);
        }
        if let Some(category) = &self.category {
            return format!("category '{}'", category);
        }
        if let Some(range) = &self.price_range {
            return format!("price {}", range);
        }
        if self.is_free == Some(true) {
            return "free only".to_string();
        }
        if let Some(sort_by) = &self.sort_by {
            return format!("sorted by {}", sort_by);
        }
        "all".to_string()
    }
}

// == Search Page ==
/// Results plus the total hit count reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
    pub total: u64,
}

impl SearchPage {
    pub fn new(results: Vec<SearchResult>, total: u64) -> Self {
        Self { results, total }
    }
}
