//! Search filters over the article list.
//!
//! A filter turns raw submitted criteria into an [`ArticleSearch`]. It only
//! narrows the list when it was submitted and well-formed; anything else
//! falls back to [`ArticleSearch::All`]. Malformed input is reported as a
//! [`FilterIssue`] so the caller can show it next to the unfiltered list.
//!
//! A filter counts as submitted when at least one of its fields carries a
//! non-blank value.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::CategoryId;

/// What the article store should be asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleSearch {
    All,
    /// Articles whose name matches exactly.
    ByName(String),
    ByCategory(CategoryId),
    /// Inclusive price bounds.
    ByPriceRange { min: Decimal, max: Decimal },
}

/// Problem with one submitted filter field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterIssue {
    #[schema(value_type = String, example = "minPrice")]
    pub field: &'static str,
    #[schema(value_type = String, example = "not_a_number")]
    pub code: &'static str,
    #[schema(example = "minPrice must be a decimal number")]
    pub message: String,
}

impl FilterIssue {
    fn not_a_number(field: &'static str) -> Self {
        Self {
            field,
            code: "not_a_number",
            message: format!("{field} must be a decimal number"),
        }
    }

    fn missing(field: &'static str) -> Self {
        Self {
            field,
            code: "blank",
            message: format!("{field} is required when filtering by price"),
        }
    }
}

/// Result of resolving a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub search: ArticleSearch,
    pub issues: Vec<FilterIssue>,
}

impl FilterOutcome {
    fn all() -> Self {
        Self {
            search: ArticleSearch::All,
            issues: Vec::new(),
        }
    }
}

/// Common behaviour of the article filters.
pub trait ArticleFilter {
    /// Whether any field of the filter was submitted.
    fn is_submitted(&self) -> bool;

    /// Build the search for a submitted filter.
    ///
    /// # Errors
    /// Returns every malformed field.
    fn search(&self) -> Result<ArticleSearch, Vec<FilterIssue>>;

    /// Resolve to a search, degrading to [`ArticleSearch::All`] when the
    /// filter is absent or malformed.
    fn resolve(&self) -> FilterOutcome {
        if !self.is_submitted() {
            return FilterOutcome::all();
        }
        match self.search() {
            Ok(search) => FilterOutcome {
                search,
                issues: Vec::new(),
            },
            Err(issues) => FilterOutcome {
                search: ArticleSearch::All,
                issues,
            },
        }
    }
}

fn present(raw: Option<&String>) -> Option<&str> {
    raw.map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// Filter by exact article name.
///
/// # Examples
/// ```
/// use catalog::domain::{ArticleFilter, ArticleSearch, NameFilter};
///
/// let outcome = NameFilter::new(Some("Chaise en bois".into())).resolve();
/// assert_eq!(outcome.search, ArticleSearch::ByName("Chaise en bois".into()));
/// assert_eq!(NameFilter::new(Some("  ".into())).resolve().search, ArticleSearch::All);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    pub nom: Option<String>,
}

impl NameFilter {
    #[must_use]
    pub fn new(nom: Option<String>) -> Self {
        Self { nom }
    }
}

impl ArticleFilter for NameFilter {
    fn is_submitted(&self) -> bool {
        present(self.nom.as_ref()).is_some()
    }

    fn search(&self) -> Result<ArticleSearch, Vec<FilterIssue>> {
        Ok(present(self.nom.as_ref()).map_or(ArticleSearch::All, |nom| {
            ArticleSearch::ByName(nom.to_owned())
        }))
    }
}

/// Filter by owning category.
///
/// The filter only checks that the id is well-formed; whether the category
/// exists is decided by the catalogue service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

impl CategoryFilter {
    #[must_use]
    pub fn new(category: Option<String>) -> Self {
        Self { category }
    }
}

impl ArticleFilter for CategoryFilter {
    fn is_submitted(&self) -> bool {
        present(self.category.as_ref()).is_some()
    }

    fn search(&self) -> Result<ArticleSearch, Vec<FilterIssue>> {
        let Some(raw) = present(self.category.as_ref()) else {
            return Ok(ArticleSearch::All);
        };
        raw.parse::<i64>()
            .map(|id| ArticleSearch::ByCategory(CategoryId::new(id)))
            .map_err(|_| {
                vec![FilterIssue {
                    field: "category",
                    code: "not_an_id",
                    message: "category must be a category id".to_owned(),
                }]
            })
    }
}

/// Filter by inclusive price range.
///
/// Both bounds are required. An inverted range is well-formed and simply
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRangeFilter {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl PriceRangeFilter {
    #[must_use]
    pub fn new(min_price: Option<String>, max_price: Option<String>) -> Self {
        Self {
            min_price,
            max_price,
        }
    }
}

fn parse_bound(raw: Option<&String>, field: &'static str) -> Result<Decimal, FilterIssue> {
    let value = present(raw).ok_or_else(|| FilterIssue::missing(field))?;
    Decimal::from_str(value).map_err(|_| FilterIssue::not_a_number(field))
}

impl ArticleFilter for PriceRangeFilter {
    fn is_submitted(&self) -> bool {
        present(self.min_price.as_ref()).is_some() || present(self.max_price.as_ref()).is_some()
    }

    fn search(&self) -> Result<ArticleSearch, Vec<FilterIssue>> {
        let min = parse_bound(self.min_price.as_ref(), "minPrice");
        let max = parse_bound(self.max_price.as_ref(), "maxPrice");
        match (min, max) {
            (Ok(min), Ok(max)) => Ok(ArticleSearch::ByPriceRange { min, max }),
            (min, max) => Err([min.err(), max.err()].into_iter().flatten().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn some(value: &str) -> Option<String> {
        Some(value.to_owned())
    }

    #[rstest]
    #[case(None)]
    #[case(some(""))]
    #[case(some("   "))]
    fn unsubmitted_name_filter_lists_everything(#[case] nom: Option<String>) {
        let filter = NameFilter::new(nom);
        assert!(!filter.is_submitted());
        assert_eq!(filter.resolve(), FilterOutcome::all());
    }

    #[test]
    fn name_filter_trims_the_submitted_name() {
        let outcome = NameFilter::new(some("  Lampe de bureau ")).resolve();
        assert_eq!(
            outcome.search,
            ArticleSearch::ByName("Lampe de bureau".to_owned())
        );
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn category_filter_parses_the_id() {
        let outcome = CategoryFilter::new(some("3")).resolve();
        assert_eq!(outcome.search, ArticleSearch::ByCategory(CategoryId::new(3)));
    }

    #[test]
    fn malformed_category_degrades_to_all_with_an_issue() {
        let outcome = CategoryFilter::new(some("chairs")).resolve();
        assert_eq!(outcome.search, ArticleSearch::All);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(
            outcome.issues.first().map(|issue| issue.field),
            Some("category")
        );
    }

    #[rstest]
    #[case("100", "100", Decimal::new(100, 0), Decimal::new(100, 0))]
    #[case("0", "49.99", Decimal::ZERO, Decimal::new(4999, 2))]
    #[case("200", "50", Decimal::new(200, 0), Decimal::new(50, 0))]
    fn price_filter_accepts_any_decimal_bounds(
        #[case] min: &str,
        #[case] max: &str,
        #[case] expected_min: Decimal,
        #[case] expected_max: Decimal,
    ) {
        let outcome = PriceRangeFilter::new(some(min), some(max)).resolve();
        assert_eq!(
            outcome.search,
            ArticleSearch::ByPriceRange {
                min: expected_min,
                max: expected_max
            }
        );
    }

    #[test]
    fn price_filter_reports_every_bad_bound() {
        let outcome = PriceRangeFilter::new(some("cheap"), some("")).resolve();
        assert_eq!(outcome.search, ArticleSearch::All);
        let fields: Vec<_> = outcome.issues.iter().map(|issue| issue.field).collect();
        assert_eq!(fields, vec!["minPrice", "maxPrice"]);
        let codes: Vec<_> = outcome.issues.iter().map(|issue| issue.code).collect();
        assert_eq!(codes, vec!["not_a_number", "blank"]);
    }

    #[test]
    fn unsubmitted_price_filter_lists_everything() {
        let filter = PriceRangeFilter::new(some(""), None);
        assert!(!filter.is_submitted());
        assert_eq!(filter.resolve(), FilterOutcome::all());
    }
}
