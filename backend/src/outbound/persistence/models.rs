//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them into
//! domain values, which re-validates anything read back from the database.

use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::{
    Article, ArticleId, ArticleName, ArticleValidationError, Category, CategoryId, CategoryName,
    CategoryValidationError, Price,
};

use super::schema::{articles, categories};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArticleRow {
    pub id: i64,
    pub nom: String,
    pub prix: Decimal,
}

impl TryFrom<ArticleRow> for Article {
    type Error = ArticleValidationError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Self::new(
            ArticleId::new(row.id),
            ArticleName::new(row.nom)?,
            Price::new(row.prix)?,
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = articles)]
pub(crate) struct NewArticleRow<'a> {
    pub nom: &'a str,
    pub prix: Decimal,
    pub category_id: Option<i64>,
}

/// Editable columns; the category is fixed at creation.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = articles)]
pub(crate) struct ArticleUpdate<'a> {
    pub nom: &'a str,
    pub prix: Decimal,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i64,
    pub nom: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = CategoryValidationError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self::new(CategoryId::new(row.id), CategoryName::new(row.nom)?))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub nom: &'a str,
}
