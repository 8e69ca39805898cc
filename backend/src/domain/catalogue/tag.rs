//! Tag entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CatalogueValidationError;
use super::validation::{validate_hex_color, validate_slug, validate_text};

/// Input payload for [`Tag::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDraft {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Label used to group recipes, for example "breakfast".
///
/// Name, colour and slug are each unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl Tag {
    /// Validate and construct a tag.
    pub fn new(draft: TagDraft) -> Result<Self, CatalogueValidationError> {
        Ok(Self {
            id: draft.id,
            name: validate_text(draft.name, "tag.name")?,
            color: validate_hex_color(draft.color, "tag.color")?,
            slug: validate_slug(draft.slug, "tag.slug")?,
        })
    }
}
