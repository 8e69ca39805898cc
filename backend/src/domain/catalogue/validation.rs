//! Validation helpers shared by catalogue entities.

use super::{CATALOGUE_TEXT_MAX, CatalogueValidationError};
use crate::domain::slug::is_valid_slug;

pub(super) fn validate_text(
    value: String,
    field: &'static str,
) -> Result<String, CatalogueValidationError> {
    if value.trim().is_empty() {
        return Err(CatalogueValidationError::EmptyField { field });
    }
    if value.chars().count() > CATALOGUE_TEXT_MAX {
        return Err(CatalogueValidationError::TooLong {
            field,
            max: CATALOGUE_TEXT_MAX,
        });
    }
    Ok(value)
}

pub(super) fn validate_slug(
    value: String,
    field: &'static str,
) -> Result<String, CatalogueValidationError> {
    if !is_valid_slug(&value) {
        return Err(CatalogueValidationError::InvalidSlug { field });
    }
    Ok(value)
}

/// Accept `#RRGGBB` and normalise to upper case so uniqueness holds
/// regardless of input casing.
pub(super) fn validate_hex_color(
    value: String,
    field: &'static str,
) -> Result<String, CatalogueValidationError> {
    let digits = value.strip_prefix('#').unwrap_or_default();
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(CatalogueValidationError::InvalidColor { field, value });
    }
    Ok(value.to_ascii_uppercase())
}
