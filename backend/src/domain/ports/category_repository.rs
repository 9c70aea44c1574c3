//! Driven port for category persistence.

use async_trait::async_trait;

use crate::domain::{Article, Category, CategoryDraft, CategoryId};

/// Errors raised by category repositories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryRepositoryError {
    /// Repository connection could not be established.
    #[error("category repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution or row conversion.
    #[error("category repository query failed: {message}")]
    Query { message: String },
}

impl CategoryRepositoryError {
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
}

/// Port for storing categories and listing the articles they own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, ordered by id.
    async fn find_all(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    async fn find_by_id(&self, id: CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;

    async fn insert(&self, draft: &CategoryDraft) -> Result<Category, CategoryRepositoryError>;

    /// Articles filed under the category, ordered by id. Unknown ids yield
    /// an empty list.
    async fn articles_of(&self, id: CategoryId) -> Result<Vec<Article>, CategoryRepositoryError>;
}
