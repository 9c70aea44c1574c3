//! Domain primitives, use cases and ports.
//!
//! Purpose: define the strongly typed catalogue entities and the service the
//! inbound adapters drive. Types are valid by construction; every invariant
//! is enforced in the constructor and documented on the type.
//!
//! Public surface:
//! - Article, ArticleDraft, ArticleChanges, ArticleName, Price: catalogue items.
//! - Category, CategoryDraft, CategoryName: article groupings.
//! - ArticleFilter and its implementations: search criteria.
//! - CatalogueService: use cases over the ports.
//! - Error, ErrorCode: transport-agnostic failures.
//! - TraceId: request correlation identifier.

pub mod article;
pub mod catalogue_service;
pub mod category;
pub mod error;
pub mod filters;
pub mod ports;
pub mod trace_id;

pub use self::article::{
    ARTICLE_NAME_MAX, ARTICLE_NAME_MIN, Article, ArticleChanges, ArticleDraft, ArticleId,
    ArticleName, ArticleValidationError, PRICE_SCALE, Price,
};
pub use self::catalogue_service::{
    CatalogueService, DEMO_ARTICLE_NAME, DEMO_ARTICLE_PRICE, SearchResults,
};
pub use self::category::{
    CATEGORY_NAME_MAX, Category, CategoryDraft, CategoryId, CategoryName, CategoryValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::filters::{
    ArticleFilter, ArticleSearch, CategoryFilter, FilterIssue, FilterOutcome, NameFilter,
    PriceRangeFilter,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
