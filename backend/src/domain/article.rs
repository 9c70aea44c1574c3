//! Article data model.
//!
//! An article is a catalogue item with a name (`nom`) and a price (`prix`).
//! [`ArticleDraft`] describes an article that has not been stored yet;
//! [`Article`] always carries the identifier the store assigned to it.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Minimum number of characters in an article name.
pub const ARTICLE_NAME_MIN: usize = 5;
/// Maximum number of characters in an article name.
pub const ARTICLE_NAME_MAX: usize = 50;
/// Number of fractional digits kept on a price.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound on a price magnitude (`NUMERIC(10, 2)`).
const PRICE_LIMIT: i64 = 100_000_000;

/// Validation errors raised while building article values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleValidationError {
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    MissingPrice,
    InvalidPrice,
    ZeroPrice,
    PriceOutOfRange,
}

impl ArticleValidationError {
    /// Form field the error belongs to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooShort { .. } | Self::NameTooLong { .. } => "nom",
            Self::MissingPrice | Self::InvalidPrice | Self::ZeroPrice | Self::PriceOutOfRange => {
                "prix"
            }
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::MissingPrice => "blank",
            Self::NameTooShort { .. } => "too_short",
            Self::NameTooLong { .. } => "too_long",
            Self::InvalidPrice => "not_a_number",
            Self::ZeroPrice => "zero",
            Self::PriceOutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for ArticleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "article name must not be blank"),
            Self::NameTooShort { min } => {
                write!(f, "article name must be at least {min} characters long")
            }
            Self::NameTooLong { max } => {
                write!(f, "article name cannot be longer than {max} characters")
            }
            Self::MissingPrice => write!(f, "price must not be blank"),
            Self::InvalidPrice => write!(f, "price must be a decimal number"),
            Self::ZeroPrice => write!(f, "price must not be zero"),
            Self::PriceOutOfRange => write!(f, "price must be below {PRICE_LIMIT}"),
        }
    }
}

impl std::error::Error for ArticleValidationError {}

/// Store-assigned article identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(i64);

impl ArticleId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Article name, trimmed and between [`ARTICLE_NAME_MIN`] and
/// [`ARTICLE_NAME_MAX`] characters long.
///
/// Length is counted in Unicode scalar values, so `"Théière"` is seven
/// characters.
///
/// # Examples
/// ```
/// use catalog::domain::ArticleName;
///
/// let name = ArticleName::new("  Chaise en bois ").expect("valid name");
/// assert_eq!(name.as_ref(), "Chaise en bois");
/// assert!(ArticleName::new("Pot").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleName(String);

impl ArticleName {
    /// Validate and construct an [`ArticleName`].
    pub fn new(nom: impl Into<String>) -> Result<Self, ArticleValidationError> {
        Self::from_owned(nom.into())
    }

    fn from_owned(nom: String) -> Result<Self, ArticleValidationError> {
        let trimmed = nom.trim();
        if trimmed.is_empty() {
            return Err(ArticleValidationError::EmptyName);
        }

        let length = trimmed.chars().count();
        if length < ARTICLE_NAME_MIN {
            return Err(ArticleValidationError::NameTooShort {
                min: ARTICLE_NAME_MIN,
            });
        }
        if length > ARTICLE_NAME_MAX {
            return Err(ArticleValidationError::NameTooLong {
                max: ARTICLE_NAME_MAX,
            });
        }

        if trimmed.len() == nom.len() {
            Ok(Self(nom))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for ArticleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ArticleName> for String {
    fn from(value: ArticleName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ArticleName {
    type Error = ArticleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Non-zero article price with two fractional digits.
///
/// Inputs with more digits are rounded half away from zero, and the zero
/// check runs after rounding, so `0.004` is rejected.
///
/// # Examples
/// ```
/// use catalog::domain::Price;
///
/// let price: Price = "49.985".parse().expect("valid price");
/// assert_eq!(price.to_string(), "49.99");
/// assert!("0.00".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Round and validate a decimal amount.
    pub fn new(amount: Decimal) -> Result<Self, ArticleValidationError> {
        let mut rounded =
            amount.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            return Err(ArticleValidationError::ZeroPrice);
        }
        if rounded.abs() >= Decimal::from(PRICE_LIMIT) {
            return Err(ArticleValidationError::PriceOutOfRange);
        }
        rounded.rescale(PRICE_SCALE);
        Ok(Self(rounded))
    }

    /// The rounded amount, always at scale [`PRICE_SCALE`].
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Price {
    type Err = ArticleValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ArticleValidationError::MissingPrice);
        }
        let amount =
            Decimal::from_str(trimmed).map_err(|_| ArticleValidationError::InvalidPrice)?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ArticleValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Article that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub nom: ArticleName,
    pub prix: Price,
    /// Category to file the article under, if any.
    pub category: Option<CategoryId>,
}

impl ArticleDraft {
    #[must_use]
    pub fn new(nom: ArticleName, prix: Price) -> Self {
        Self {
            nom,
            prix,
            category: None,
        }
    }

    #[must_use]
    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }
}

/// Editable fields of a stored article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleChanges {
    pub nom: ArticleName,
    pub prix: Price,
}

/// Stored article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    nom: ArticleName,
    prix: Price,
}

impl Article {
    #[must_use]
    pub fn new(id: ArticleId, nom: ArticleName, prix: Price) -> Self {
        Self { id, nom, prix }
    }

    /// Attach the store-assigned id to a draft.
    #[must_use]
    pub fn from_draft(id: ArticleId, draft: ArticleDraft) -> Self {
        Self::new(id, draft.nom, draft.prix)
    }

    #[must_use]
    pub fn id(&self) -> ArticleId {
        self.id
    }

    #[must_use]
    pub fn nom(&self) -> &ArticleName {
        &self.nom
    }

    #[must_use]
    pub fn prix(&self) -> Price {
        self.prix
    }

    /// Apply edits; the id never changes.
    #[must_use]
    pub fn with_changes(self, changes: ArticleChanges) -> Self {
        Self {
            id: self.id,
            nom: changes.nom,
            prix: changes.prix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Chaise")]
    #[case("12345")]
    #[case("Théière")]
    #[case("  padded  ")]
    fn accepts_names_within_bounds(#[case] raw: &str) {
        let name = ArticleName::new(raw).expect("name within bounds");
        assert_eq!(name.as_ref(), raw.trim());
    }

    #[test]
    fn accepts_a_fifty_character_name() {
        let raw = "a".repeat(ARTICLE_NAME_MAX);
        assert!(ArticleName::new(raw).is_ok());
    }

    #[rstest]
    #[case("", ArticleValidationError::EmptyName)]
    #[case("    ", ArticleValidationError::EmptyName)]
    #[case("Pot", ArticleValidationError::NameTooShort { min: ARTICLE_NAME_MIN })]
    #[case("  abcd  ", ArticleValidationError::NameTooShort { min: ARTICLE_NAME_MIN })]
    fn rejects_short_names(#[case] raw: &str, #[case] expected: ArticleValidationError) {
        assert_eq!(ArticleName::new(raw), Err(expected));
    }

    #[test]
    fn rejects_a_fifty_one_character_name() {
        let raw = "a".repeat(ARTICLE_NAME_MAX + 1);
        assert_eq!(
            ArticleName::new(raw),
            Err(ArticleValidationError::NameTooLong {
                max: ARTICLE_NAME_MAX
            })
        );
    }

    #[rstest]
    #[case("49.99", Decimal::new(4999, 2))]
    #[case("10", Decimal::new(1000, 2))]
    #[case("0.005", Decimal::new(1, 2))]
    #[case("-2.345", Decimal::new(-235, 2))]
    #[case(" 1000 ", Decimal::new(100_000, 2))]
    fn parses_and_rounds_prices(#[case] raw: &str, #[case] expected: Decimal) {
        let price: Price = raw.parse().expect("valid price");
        assert_eq!(price.amount(), expected);
        assert_eq!(price.amount().scale(), PRICE_SCALE);
    }

    #[rstest]
    #[case("", ArticleValidationError::MissingPrice)]
    #[case("abc", ArticleValidationError::InvalidPrice)]
    #[case("0", ArticleValidationError::ZeroPrice)]
    #[case("0.004", ArticleValidationError::ZeroPrice)]
    #[case("100000000", ArticleValidationError::PriceOutOfRange)]
    fn rejects_invalid_prices(#[case] raw: &str, #[case] expected: ArticleValidationError) {
        assert_eq!(raw.parse::<Price>(), Err(expected));
    }

    #[test]
    fn price_displays_two_fraction_digits() {
        let price: Price = "1000".parse().expect("valid price");
        assert_eq!(price.to_string(), "1000.00");
    }

    #[rstest]
    #[case(ArticleValidationError::NameTooShort { min: 5 }, "nom", "too_short")]
    #[case(ArticleValidationError::ZeroPrice, "prix", "zero")]
    #[case(ArticleValidationError::InvalidPrice, "prix", "not_a_number")]
    fn errors_name_their_field(
        #[case] error: ArticleValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        assert_eq!(error.field(), field);
        assert_eq!(error.code(), code);
    }

    #[test]
    fn changes_keep_the_article_id() {
        let article = Article::new(
            ArticleId::new(7),
            ArticleName::new("Chaise en bois").expect("name"),
            "49.99".parse().expect("price"),
        );
        let edited = article.with_changes(ArticleChanges {
            nom: ArticleName::new("Chaise en chêne").expect("name"),
            prix: "59.99".parse().expect("price"),
        });
        assert_eq!(edited.id(), ArticleId::new(7));
        assert_eq!(edited.prix().to_string(), "59.99");
        assert_eq!(edited.nom().as_ref(), "Chaise en chêne");
    }
}
