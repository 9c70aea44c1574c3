//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the catalogue
//! service, never a concrete store.

use std::sync::Arc;

use crate::domain::CatalogueService;
use crate::domain::ports::{ArticleRepository, CategoryRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: CatalogueService,
}

impl HttpState {
    /// Build state over the given ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use catalog::inbound::http::state::HttpState;
    /// use catalog::outbound::memory::InMemoryCatalogue;
    ///
    /// let store = Arc::new(InMemoryCatalogue::new());
    /// let _state = HttpState::new(store.clone(), store);
    /// ```
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            catalogue: CatalogueService::new(articles, categories),
        }
    }
}
