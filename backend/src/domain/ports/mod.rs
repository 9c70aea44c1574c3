//! Driven ports implemented by outbound adapters.
//!
//! Each port is an async trait object shared behind `Arc<dyn …>`; unit tests
//! substitute the `mockall` doubles generated under `cfg(test)`.

mod article_repository;
mod category_repository;

pub use article_repository::{ArticleRepository, ArticleRepositoryError};
pub use category_repository::{CategoryRepository, CategoryRepositoryError};

#[cfg(test)]
pub use article_repository::MockArticleRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
