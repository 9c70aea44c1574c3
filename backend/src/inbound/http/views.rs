//! JSON view models standing in for rendered pages.
//!
//! Field names are camelCase on the wire. Prices are rendered as strings
//! with two fractional digits so clients never see float rounding.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Article, ArticleId, ArticleSearch, ArticleValidationError, Category, CategoryValidationError,
    FilterIssue,
};

/// One article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Chaise en bois")]
    pub nom: String,
    #[schema(example = "49.99")]
    pub prix: String,
}

impl From<&Article> for ArticleView {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id().get(),
            nom: article.nom().to_string(),
            prix: article.prix().to_string(),
        }
    }
}

/// One category, as offered in selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Mobilier")]
    pub nom: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().get(),
            nom: category.nom().to_string(),
        }
    }
}

/// Search applied to an article list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SearchView {
    All,
    #[serde(rename_all = "camelCase")]
    ByName { nom: String },
    #[serde(rename_all = "camelCase")]
    ByCategory { category: i64 },
    #[serde(rename_all = "camelCase")]
    ByPriceRange { min_price: String, max_price: String },
}

impl From<&ArticleSearch> for SearchView {
    fn from(search: &ArticleSearch) -> Self {
        match search {
            ArticleSearch::All => Self::All,
            ArticleSearch::ByName(nom) => Self::ByName { nom: nom.clone() },
            ArticleSearch::ByCategory(id) => Self::ByCategory { category: id.get() },
            ArticleSearch::ByPriceRange { min, max } => Self::ByPriceRange {
                min_price: min.to_string(),
                max_price: max.to_string(),
            },
        }
    }
}

/// Article list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListView {
    pub articles: Vec<ArticleView>,
    /// Search that produced `articles`.
    pub search: SearchView,
    /// Malformed filter fields; the list is unfiltered when present.
    pub filter_errors: Vec<FilterIssue>,
    /// Categories to choose from, on the category search page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryView>>,
}

impl ArticleListView {
    #[must_use]
    pub fn new(
        articles: &[Article],
        search: &ArticleSearch,
        filter_errors: Vec<FilterIssue>,
    ) -> Self {
        Self {
            articles: articles.iter().map(ArticleView::from).collect(),
            search: SearchView::from(search),
            filter_errors,
            categories: None,
        }
    }

    #[must_use]
    pub fn with_categories(mut self, categories: &[Category]) -> Self {
        self.categories = Some(categories.iter().map(CategoryView::from).collect());
        self
    }
}

/// Validation failure on one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "nom")]
    pub field: String,
    #[schema(example = "too_short")]
    pub code: String,
    #[schema(example = "article name must be at least 5 characters long")]
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<ArticleValidationError> for FieldError {
    fn from(err: ArticleValidationError) -> Self {
        Self::new(err.field(), err.code(), err.to_string())
    }
}

impl From<CategoryValidationError> for FieldError {
    fn from(err: CategoryValidationError) -> Self {
        Self::new(err.field(), err.code(), err.to_string())
    }
}

/// Values echoed back into an article form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFormValues {
    pub nom: String,
    pub prix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Article creation or edit page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFormView {
    /// Where the form posts to.
    #[schema(example = "/article/new")]
    pub action: String,
    /// Article being edited; absent on creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<i64>,
    pub values: ArticleFormValues,
    pub errors: Vec<FieldError>,
    /// Categories the new article can be filed under; absent when editing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryView>>,
}

impl ArticleFormView {
    /// Empty creation form.
    #[must_use]
    pub fn creation(categories: &[Category]) -> Self {
        Self {
            action: "/article/new".to_owned(),
            article_id: None,
            values: ArticleFormValues::default(),
            errors: Vec::new(),
            categories: Some(categories.iter().map(CategoryView::from).collect()),
        }
    }

    /// Edit form pre-filled with the stored article.
    #[must_use]
    pub fn edition(article: &Article) -> Self {
        Self {
            action: format!("/article/edit/{}", article.id()),
            article_id: Some(article.id().get()),
            values: ArticleFormValues {
                nom: article.nom().to_string(),
                prix: article.prix().to_string(),
                category: None,
            },
            errors: Vec::new(),
            categories: None,
        }
    }

    /// Edit form for `id` showing rejected input.
    #[must_use]
    pub fn rejected_edition(
        id: ArticleId,
        values: ArticleFormValues,
        errors: Vec<FieldError>,
    ) -> Self {
        Self {
            action: format!("/article/edit/{id}"),
            article_id: Some(id.get()),
            values,
            errors,
            categories: None,
        }
    }

    #[must_use]
    pub fn with_rejected(mut self, values: ArticleFormValues, errors: Vec<FieldError>) -> Self {
        self.values = values;
        self.errors = errors;
        self
    }
}

/// Values echoed back into the category form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CategoryFormValues {
    pub nom: String,
}

/// Category creation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFormView {
    #[schema(example = "/category/newCat")]
    pub action: String,
    pub values: CategoryFormValues,
    pub errors: Vec<FieldError>,
}

impl Default for CategoryFormView {
    fn default() -> Self {
        Self {
            action: "/category/newCat".to_owned(),
            values: CategoryFormValues::default(),
            errors: Vec::new(),
        }
    }
}

/// Plain status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageView {
    #[schema(example = "Article deleted successfully")]
    pub message: String,
}

impl MessageView {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
