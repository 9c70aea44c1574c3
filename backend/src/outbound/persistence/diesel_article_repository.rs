//! PostgreSQL-backed `ArticleRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use rust_decimal::Decimal;

use crate::domain::ports::{ArticleRepository, ArticleRepositoryError};
use crate::domain::{Article, ArticleDraft, ArticleId, CategoryId};

use super::error_mapping::{article_diesel_error, article_pool_error};
use super::models::{ArticleRow, ArticleUpdate, NewArticleRow};
use super::pool::DbPool;
use super::schema::{articles, categories};

/// Diesel implementation of the article port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the insert transaction.
enum InsertFailure {
    Diesel(DieselError),
    UnknownCategory(CategoryId),
}

impl From<DieselError> for InsertFailure {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn to_articles(rows: Vec<ArticleRow>) -> Result<Vec<Article>, ArticleRepositoryError> {
    rows.into_iter()
        .map(|row| {
            Article::try_from(row).map_err(|err| ArticleRepositoryError::query(err.to_string()))
        })
        .collect()
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn find_all(&self) -> Result<Vec<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(article_pool_error)?;
        let rows = articles::table
            .select(ArticleRow::as_select())
            .order_by(articles::id)
            .load(&mut conn)
            .await
            .map_err(article_diesel_error)?;
        to_articles(rows)
    }

    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(article_pool_error)?;
        let row = articles::table
            .find(id.get())
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(article_diesel_error)?;
        row.map(|row| {
            Article::try_from(row).map_err(|err| ArticleRepositoryError::query(err.to_string()))
        })
        .transpose()
    }

    async fn find_by_name(&self, nom: &str) -> Result<Vec<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(article_pool_error)?;
        let rows = articles::table
            .filter(articles::nom.eq(nom))
            .select(ArticleRow::as_select())
            .order_by(articles::id)
            .load(&mut conn)
            .await
            .map_err(article_diesel_error)?;
        to_articles(rows)
    }

    async fn find_by_price_range(
        &self,
        min: Decimal,
        max: Decimal,
    ) -> Result<Vec<Article>, ArticleRepositoryError> {
        if min > max {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(article_pool_error)?;
        let rows = articles::table
            .filter(articles::prix.between(min, max))
            .select(ArticleRow::as_select())
            .order_by(articles::id)
            .load(&mut conn)
            .await
            .map_err(article_diesel_error)?;
        to_articles(rows)
    }

    async fn insert(&self, draft: &ArticleDraft) -> Result<Article, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(article_pool_error)?;
        let new_row = NewArticleRow {
            nom: draft.nom.as_ref(),
            prix: draft.prix.amount(),
            category_id: draft.category.map(CategoryId::get),
        };
        let result = conn
            .transaction::<_, InsertFailure, _>(|conn| {
                async move {
                    if let Some(category) = draft.category {
                        let exists: bool = diesel::select(diesel::dsl::exists(
                            categories::table.find(category.get()),
                        ))
                        .get_result(conn)
                        .await?;
                        if !exists {
                            return Err(InsertFailure::UnknownCategory(category));
                        }
                    }
                    let id: i64 = diesel::insert_into(articles::table)
                        .values(&new_row)
                        .returning(articles::id)
                        .get_result(conn)
                        .await?;
                    Ok(id)
                }
                .scope_boxed()
            })
            .await;

        match result {
            Ok(id) => Ok(Article::from_draft(ArticleId::new(id), draft.clone())),
            Err(InsertFailure::UnknownCategory(category)) => {
                Err(ArticleRepositoryError::unknown_category(category))
            }
            Err(InsertFailure::Diesel(error)) => Err(article_diesel_error(error)),
        }
    }

    async fn update(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(article_pool_error)?;
        let changes = ArticleUpdate {
            nom: article.nom().as_ref(),
            prix: article.prix().amount(),
        };
        let updated = diesel::update(articles::table.find(article.id().get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(article_diesel_error)?;
        if updated == 0 {
            return Err(ArticleRepositoryError::not_found(article.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: ArticleId) -> Result<(), ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(article_pool_error)?;
        let deleted = diesel::delete(articles::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(article_diesel_error)?;
        if deleted == 0 {
            return Err(ArticleRepositoryError::not_found(id));
        }
        Ok(())
    }
}
