//! Driven port for article persistence.
//!
//! Adapters translate between their storage representation and the domain
//! [`Article`] types; no validation happens behind this boundary because the
//! values crossing it are already valid by construction.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Article, ArticleDraft, ArticleId, CategoryId};

/// Errors raised by article repositories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleRepositoryError {
    /// Repository connection could not be established.
    #[error("article repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution or row conversion.
    #[error("article repository query failed: {message}")]
    Query { message: String },
    /// No article has the requested id.
    #[error("article {id} not found")]
    NotFound { id: ArticleId },
    /// The draft names a category that does not exist.
    #[error("category {id} does not exist")]
    UnknownCategory { id: CategoryId },
}

impl ArticleRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: ArticleId) -> Self {
        Self::NotFound { id }
    }

    #[must_use]
    pub fn unknown_category(id: CategoryId) -> Self {
        Self::UnknownCategory { id }
    }
}

/// Port for storing and querying articles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Every article, ordered by id.
    async fn find_all(&self) -> Result<Vec<Article>, ArticleRepositoryError>;

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleRepositoryError>;

    /// Articles whose name equals `nom` exactly.
    async fn find_by_name(&self, nom: &str) -> Result<Vec<Article>, ArticleRepositoryError>;

    /// Articles priced within `min..=max`, ordered by id.
    ///
    /// An inverted range yields an empty list rather than an error.
    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Article>, ArticleRepositoryError>;

    /// Store a draft and return it with its assigned id.
    async fn insert(&self, draft: &ArticleDraft) -> Result<Article, ArticleRepositoryError>;

    /// Overwrite the name and price of a stored article.
    async fn update(&self, article: &Article) -> Result<(), ArticleRepositoryError>;

    async fn delete(&self, id: ArticleId) -> Result<(), ArticleRepositoryError>;
}
