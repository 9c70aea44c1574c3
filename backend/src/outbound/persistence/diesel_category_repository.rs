//! PostgreSQL-backed `CategoryRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{Article, Category, CategoryDraft, CategoryId};

use super::error_mapping::{category_diesel_error, category_pool_error};
use super::models::{ArticleRow, CategoryRow, NewCategoryRow};
use super::pool::DbPool;
use super::schema::{articles, categories};

/// Diesel implementation of the category port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_category(row: CategoryRow) -> Result<Category, CategoryRepositoryError> {
    Category::try_from(row).map_err(|err| CategoryRepositoryError::query(err.to_string()))
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(category_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order_by(categories::id)
            .load(&mut conn)
            .await
            .map_err(category_diesel_error)?;
        rows.into_iter().map(to_category).collect()
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(category_pool_error)?;
        let row = categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(category_diesel_error)?;
        row.map(to_category).transpose()
    }

    async fn insert(&self, draft: &CategoryDraft) -> Result<Category, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(category_pool_error)?;
        let row = diesel::insert_into(categories::table)
            .values(NewCategoryRow {
                nom: draft.nom.as_ref(),
            })
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(category_diesel_error)?;
        to_category(row)
    }

    async fn articles_of(&self, id: CategoryId) -> Result<Vec<Article>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(category_pool_error)?;
        let rows: Vec<ArticleRow> = articles::table
            .filter(articles::category_id.eq(id.get()))
            .select(ArticleRow::as_select())
            .order_by(articles::id)
            .load(&mut conn)
            .await
            .map_err(category_diesel_error)?;
        rows.into_iter()
            .map(|row| {
                Article::try_from(row)
                    .map_err(|err| CategoryRepositoryError::query(err.to_string()))
            })
            .collect()
    }
}
