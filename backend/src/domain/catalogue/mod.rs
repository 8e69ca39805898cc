//! Ingredient and tag reference data.
//!
//! Both entities are read-only from the API's point of view: recipes refer
//! to them by id and the catalogue endpoints list them.

use std::fmt;

mod ingredient;
mod tag;
mod validation;


pub use ingredient::{Ingredient, IngredientDraft};
pub use tag::{Tag, TagDraft};

/// Maximum length of ingredient names, units and tag names.
pub const CATALOGUE_TEXT_MAX: usize = 200;

/// Validation errors returned by catalogue constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueValidationError {
    EmptyField { field: &'static str },
    TooLong { field: &'static str, max: usize },
    InvalidSlug { field: &'static str },
    InvalidColor { field: &'static str, value: String },
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::InvalidSlug { field } => write!(
                f,
                "{field} must contain ASCII letters, digits, hyphens or underscores"
            ),
            Self::InvalidColor { field, value } => {
                write!(f, "{field} must be a #RRGGBB colour (got {value})")
            }
        }
    }
}

impl std::error::Error for CatalogueValidationError {}
