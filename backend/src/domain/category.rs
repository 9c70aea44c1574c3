//! Category data model.
//!
//! Categories group articles. The relation is one-to-many and owned by the
//! category: an article is filed under a category when it is created and
//! the category lists its articles through the store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters in a category name.
pub const CATEGORY_NAME_MAX: usize = 50;

/// Validation errors raised while building category values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong { max: usize },
}

impl CategoryValidationError {
    /// Form field the error belongs to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        "nom"
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "blank",
            Self::NameTooLong { .. } => "too_long",
        }
    }
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "category name must not be blank"),
            Self::NameTooLong { max } => {
                write!(f, "category name cannot be longer than {max} characters")
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Store-assigned category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trimmed, non-blank category name of at most [`CATEGORY_NAME_MAX`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(nom: impl Into<String>) -> Result<Self, CategoryValidationError> {
        Self::from_owned(nom.into())
    }

    fn from_owned(nom: String) -> Result<Self, CategoryValidationError> {
        let trimmed = nom.trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if trimmed.chars().count() > CATEGORY_NAME_MAX {
            return Err(CategoryValidationError::NameTooLong {
                max: CATEGORY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub nom: CategoryName,
}

/// Stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    nom: CategoryName,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, nom: CategoryName) -> Self {
        Self { id, nom }
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn nom(&self) -> &CategoryName {
        &self.nom
    }
}
