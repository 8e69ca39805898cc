//! Ingredient entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CatalogueValidationError;
use super::validation::validate_text;

/// Input payload for [`Ingredient::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDraft {
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
}

/// Something a recipe can call for, measured in a fixed unit.
///
/// `(name, measurement_unit)` is unique across the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
}

impl Ingredient {
    /// Validate and construct an ingredient.
    pub fn new(draft: IngredientDraft) -> Result<Self, CatalogueValidationError> {
        Ok(Self {
            id: draft.id,
            name: validate_text(draft.name, "ingredient.name")?,
            measurement_unit: validate_text(
                draft.measurement_unit,
                "ingredient.measurement_unit",
            )?,
        })
    }
}
