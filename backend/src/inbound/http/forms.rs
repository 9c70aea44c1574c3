//! Form and query DTOs.
//!
//! Every field arrives as optional text so a half-filled form still
//! deserialises; validation then collects all field errors at once instead
//! of stopping at the first.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ArticleChanges, ArticleDraft, ArticleName, CategoryDraft, CategoryFilter, CategoryId,
    CategoryName, NameFilter, Price, PriceRangeFilter,
};

use super::views::{ArticleFormValues, CategoryFormValues, FieldError};

fn text(raw: Option<&String>) -> &str {
    raw.map_or("", String::as_str)
}

/// Article creation and edit form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ArticleForm {
    #[schema(example = "Chaise en bois")]
    pub nom: Option<String>,
    #[schema(example = "49.99")]
    pub prix: Option<String>,
    /// Category id; ignored when editing.
    #[schema(example = "1")]
    pub category: Option<String>,
}

impl ArticleForm {
    /// Submitted values, for re-rendering a rejected form.
    #[must_use]
    pub fn values(&self) -> ArticleFormValues {
        ArticleFormValues {
            nom: text(self.nom.as_ref()).to_owned(),
            prix: text(self.prix.as_ref()).to_owned(),
            category: self.category.clone(),
        }
    }

    fn fields(&self) -> Result<(ArticleName, Price), Vec<FieldError>> {
        let nom = ArticleName::new(text(self.nom.as_ref()));
        let prix = text(self.prix.as_ref()).parse::<Price>();
        match (nom, prix) {
            (Ok(nom), Ok(prix)) => Ok((nom, prix)),
            (nom, prix) => Err([nom.err(), prix.err()]
                .into_iter()
                .flatten()
                .map(FieldError::from)
                .collect()),
        }
    }

    fn category_id(&self) -> Result<Option<CategoryId>, FieldError> {
        let raw = text(self.category.as_ref()).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<i64>().map(|id| Some(CategoryId::new(id))).map_err(|_| {
            FieldError::new("category", "not_an_id", "category must be a category id")
        })
    }

    /// Validate a creation submission.
    ///
    /// # Errors
    /// Every invalid field, in form order.
    pub fn to_draft(&self) -> Result<ArticleDraft, Vec<FieldError>> {
        match (self.fields(), self.category_id()) {
            (Ok((nom, prix)), Ok(category)) => Ok(ArticleDraft {
                nom,
                prix,
                category,
            }),
            (fields, category) => {
                let mut errors = fields.err().unwrap_or_default();
                errors.extend(category.err());
                Err(errors)
            }
        }
    }

    /// Validate an edit submission.
    ///
    /// # Errors
    /// Every invalid field, in form order.
    pub fn to_changes(&self) -> Result<ArticleChanges, Vec<FieldError>> {
        self.fields().map(|(nom, prix)| ArticleChanges { nom, prix })
    }
}

/// Category creation form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CategoryForm {
    #[schema(example = "Mobilier")]
    pub nom: Option<String>,
}

impl CategoryForm {
    #[must_use]
    pub fn values(&self) -> CategoryFormValues {
        CategoryFormValues {
            nom: text(self.nom.as_ref()).to_owned(),
        }
    }

    /// Validate the submission.
    ///
    /// # Errors
    /// The name error, if any.
    pub fn to_draft(&self) -> Result<CategoryDraft, Vec<FieldError>> {
        CategoryName::new(text(self.nom.as_ref()))
            .map(|nom| CategoryDraft { nom })
            .map_err(|err| vec![FieldError::from(err)])
    }
}

/// Name filter on the home page.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Exact article name.
    pub nom: Option<String>,
}

impl From<NameQuery> for NameFilter {
    fn from(query: NameQuery) -> Self {
        Self::new(query.nom)
    }
}

/// Category filter criteria.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Category id.
    pub category: Option<String>,
}

impl From<CategoryQuery> for CategoryFilter {
    fn from(query: CategoryQuery) -> Self {
        Self::new(query.category)
    }
}

/// Price range filter criteria.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Inclusive lower bound.
    pub min_price: Option<String>,
    /// Inclusive upper bound.
    pub max_price: Option<String>,
}

impl From<PriceQuery> for PriceRangeFilter {
    fn from(query: PriceQuery) -> Self {
        Self::new(query.min_price, query.max_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form(nom: &str, prix: &str, category: Option<&str>) -> ArticleForm {
        ArticleForm {
            nom: Some(nom.to_owned()),
            prix: Some(prix.to_owned()),
            category: category.map(str::to_owned),
        }
    }

    #[test]
    fn valid_form_becomes_a_draft() {
        let draft = form("Chaise en bois", "49.99", Some("2"))
            .to_draft()
            .expect("valid form");
        assert_eq!(draft.nom.as_ref(), "Chaise en bois");
        assert_eq!(draft.prix.to_string(), "49.99");
        assert_eq!(draft.category, Some(CategoryId::new(2)));
    }

    #[test]
    fn blank_category_means_uncategorised() {
        let draft = form("Chaise en bois", "49.99", Some(" "))
            .to_draft()
            .expect("valid form");
        assert_eq!(draft.category, None);
    }

    #[test]
    fn collects_every_field_error() {
        let errors = form("Pot", "0", Some("chairs"))
            .to_draft()
            .expect_err("invalid form");
        let fields: Vec<_> = errors.iter().map(|error| error.field.as_str()).collect();
        assert_eq!(fields, vec!["nom", "prix", "category"]);
    }

    #[rstest]
    #[case(ArticleForm::default(), vec!["blank", "blank"])]
    #[case(form("a".repeat(51).as_str(), "abc", None), vec!["too_long", "not_a_number"])]
    fn reports_codes_for_missing_and_malformed_fields(
        #[case] submitted: ArticleForm,
        #[case] codes: Vec<&str>,
    ) {
        let errors = submitted.to_changes().expect_err("invalid form");
        let found: Vec<_> = errors.iter().map(|error| error.code.as_str()).collect();
        assert_eq!(found, codes);
    }

    #[test]
    fn rejected_values_are_echoed_verbatim() {
        let values = form("  Pot ", "abc", None).values();
        assert_eq!(values.nom, "  Pot ");
        assert_eq!(values.prix, "abc");
    }

    #[test]
    fn category_form_requires_a_name() {
        let errors = CategoryForm { nom: None }
            .to_draft()
            .expect_err("blank name");
        assert_eq!(errors.first().map(|error| error.code.as_str()), Some("blank"));
    }
}
