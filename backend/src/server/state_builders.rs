//! Builds the handler state from the configured store.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use catalog::inbound::http::state::HttpState;
use catalog::outbound::memory::InMemoryCatalogue;
use catalog::outbound::persistence::{DieselArticleRepository, DieselCategoryRepository};

use super::ServerConfig;

/// PostgreSQL repositories when a pool is configured, else a fresh in-memory
/// store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving the PostgreSQL catalogue");
            HttpState::new(
                Arc::new(DieselArticleRepository::new(pool.clone())),
                Arc::new(DieselCategoryRepository::new(pool.clone())),
            )
        }
        None => {
            warn!("no database configured; catalogue lives in memory");
            let store = Arc::new(InMemoryCatalogue::new());
            HttpState::new(store.clone(), store)
        }
    };
    web::Data::new(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_state_starts_empty() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("address"));
        let state = build_http_state(&config);
        let found = state
            .catalogue
            .search(catalog::domain::ArticleSearch::All)
            .await
            .expect("in-memory search succeeds");
        assert!(found.articles.is_empty());
    }
}
