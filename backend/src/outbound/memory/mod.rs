//! Process-local catalogue store.
//!
//! [`InMemoryCatalogue`] implements both repository ports over ordered maps
//! guarded by a single mutex. The server falls back to it when no database is
//! configured, and the behaviour tests drive the HTTP layer over it.
//!
//! Every operation takes the lock once and releases it before returning, so
//! no guard is ever held across an `.await`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::ports::{
    ArticleRepository, ArticleRepositoryError, CategoryRepository, CategoryRepositoryError,
};
use crate::domain::{Article, ArticleDraft, ArticleId, Category, CategoryDraft, CategoryId};

#[derive(Debug, Clone)]
struct ArticleRecord {
    article: Article,
    category: Option<CategoryId>,
}

#[derive(Debug, Default)]
struct Tables {
    articles: BTreeMap<ArticleId, ArticleRecord>,
    categories: BTreeMap<CategoryId, Category>,
    last_article_id: i64,
    last_category_id: i64,
}

impl Tables {
    fn articles_where(&self, keep: impl Fn(&ArticleRecord) -> bool) -> Vec<Article> {
        self.articles
            .values()
            .filter(|record| keep(record))
            .map(|record| record.article.clone())
            .collect()
    }
}

/// Shared in-memory store. Clones see the same data.
///
/// Identifiers start at 1 and are never reused, matching `BIGSERIAL`.
///
/// # Examples
/// ```
/// use catalog::domain::ports::ArticleRepository;
/// use catalog::domain::{ArticleDraft, ArticleName};
/// use catalog::outbound::memory::InMemoryCatalogue;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryCatalogue::new();
/// let draft = ArticleDraft::new(
///     ArticleName::new("Chaise en bois").unwrap(),
///     "49.99".parse().unwrap(),
/// );
/// let stored = store.insert(&draft).await.unwrap();
/// assert_eq!(stored.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogue {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryCatalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Every mutation completes under one guard, so a poisoned lock still
        // holds consistent tables.
        self.tables
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ArticleRepository for InMemoryCatalogue {
    async fn find_all(&self) -> Result<Vec<Article>, ArticleRepositoryError> {
        Ok(self.lock().articles_where(|_| true))
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleRepositoryError> {
        Ok(self
            .lock()
            .articles
            .get(&id)
            .map(|record| record.article.clone()))
    }

    async fn find_by_name(&self, nom: &str) -> Result<Vec<Article>, ArticleRepositoryError> {
        Ok(self
            .lock()
            .articles_where(|record| record.article.nom().as_ref() == nom))
    }

    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Article>, ArticleRepositoryError> {
        if min > max {
            return Ok(Vec::new());
        }
        Ok(self.lock().articles_where(|record| {
            let prix = record.article.prix().amount();
            prix >= min && prix <= max
        }))
    }

    async fn insert(&self, draft: &ArticleDraft) -> Result<Article, ArticleRepositoryError> {
        let mut tables = self.lock();
        if let Some(category) = draft.category
            && !tables.categories.contains_key(&category)
        {
            return Err(ArticleRepositoryError::unknown_category(category));
        }
        tables.last_article_id += 1;
        let id = ArticleId::new(tables.last_article_id);
        let article = Article::from_draft(id, draft.clone());
        tables.articles.insert(
            id,
            ArticleRecord {
                article: article.clone(),
                category: draft.category,
            },
        );
        Ok(article)
    }

    async fn update(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut tables = self.lock();
        let record = tables
            .articles
            .get_mut(&article.id())
            .ok_or_else(|| ArticleRepositoryError::not_found(article.id()))?;
        record.article = article.clone();
        Ok(())
    }

    async fn delete(&self, id: ArticleId) -> Result<(), ArticleRepositoryError> {
        self.lock()
            .articles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ArticleRepositoryError::not_found(id))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogue {
    async fn find_all(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(self.lock().categories.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        Ok(self.lock().categories.get(&id).cloned())
    }

    async fn insert(&self, draft: &CategoryDraft) -> Result<Category, CategoryRepositoryError> {
        let mut tables = self.lock();
        tables.last_category_id += 1;
        let id = CategoryId::new(tables.last_category_id);
        let category = Category::new(id, draft.nom.clone());
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn articles_of(&self, id: CategoryId) -> Result<Vec<Article>, CategoryRepositoryError> {
        Ok(self
            .lock()
            .articles_where(|record| record.category == Some(id)))
    }
}
