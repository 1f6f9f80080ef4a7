//! Search backend seam
//!
//! The remote full-text search the cache sits in front of.

use std::future::Future;

use crate::models::{SearchPage, SearchRequest};

// == Search Backend ==
/// Executes a live search.
///
/// Implementations must tolerate concurrent calls with themselves. Any
/// `Fn(SearchRequest) -> impl Future<Output = anyhow::Result<SearchPage>>`
/// closure is a backend.
pub trait SearchBackend {
    type Future: Future<Output = anyhow::Result<SearchPage>>;

    fn search(&self, request: SearchRequest) -> Self::Future;
}

impl<F, Fut> SearchBackend for F
where
    F: Fn(SearchRequest) -> Fut,
    Fut: Future<Output = anyhow::Result<SearchPage>>,
{
    type Future = Fut;

    fn search(&self, request: SearchRequest) -> Fut {
        (self)(request)
    }
}
