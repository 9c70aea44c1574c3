//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin: they translate between row structs and domain
//! values and map database failures to port errors. Row structs and the
//! schema stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use catalog::outbound::persistence::{DbPool, DieselArticleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalog")).await?;
//! let articles = DieselArticleRepository::new(pool);
//! ```

mod diesel_article_repository;
mod diesel_category_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
