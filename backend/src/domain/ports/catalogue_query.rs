//! Driving port for ingredient and tag lookups.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Ingredient, Tag};

/// Read-side use cases over the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Ingredients ordered by name, optionally filtered by a name fragment.
    async fn list_ingredients(
        &self,
        name_contains: Option<String>,
    ) -> Result<Vec<Ingredient>, Error>;

    /// One ingredient, or `not_found`.
    async fn get_ingredient(&self, ingredient_id: Uuid) -> Result<Ingredient, Error>;

    /// Every tag ordered by name.
    async fn list_tags(&self) -> Result<Vec<Tag>, Error>;

    /// One tag, or `not_found`.
    async fn get_tag(&self, tag_id: Uuid) -> Result<Tag, Error>;
}

/// Fixture catalogue with a handful of pantry staples.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueQuery;

const FIXTURE_INGREDIENTS: [(&str, &str, &str); 3] = [
    ("8c7f3e4a-0d1b-4c4e-9a51-1f6f2d8c0a01", "egg", "pcs"),
    ("8c7f3e4a-0d1b-4c4e-9a51-1f6f2d8c0a02", "flour", "g"),
    ("8c7f3e4a-0d1b-4c4e-9a51-1f6f2d8c0a03", "milk", "ml"),
];

const FIXTURE_TAGS: [(&str, &str, &str, &str); 2] = [
    (
        "5b2e1a90-7a53-4f4b-8f0e-3c1d9e6a7b01",
        "Breakfast",
        "#E26C2D",
        "breakfast",
    ),
    (
        "5b2e1a90-7a53-4f4b-8f0e-3c1d9e6a7b02",
        "Dinner",
        "#49B64E",
        "dinner",
    ),
];

fn fixture_uuid(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|err| Error::internal(format!("invalid fixture id: {err}")))
}

fn fixture_ingredients() -> Result<Vec<Ingredient>, Error> {
    FIXTURE_INGREDIENTS
        .iter()
        .map(|(id, name, unit)| {
            Ok(Ingredient {
                id: fixture_uuid(id)?,
                name: (*name).to_owned(),
                measurement_unit: (*unit).to_owned(),
            })
        })
        .collect()
}

fn fixture_tags() -> Result<Vec<Tag>, Error> {
    FIXTURE_TAGS
        .iter()
        .map(|(id, name, color, slug)| {
            Ok(Tag {
                id: fixture_uuid(id)?,
                name: (*name).to_owned(),
                color: (*color).to_owned(),
                slug: (*slug).to_owned(),
            })
        })
        .collect()
}

#[async_trait]
impl CatalogueQuery for FixtureCatalogueQuery {
    async fn list_ingredients(
        &self,
        name_contains: Option<String>,
    ) -> Result<Vec<Ingredient>, Error> {
        let needle = name_contains.map(|name| name.to_lowercase());
        Ok(fixture_ingredients()?
            .into_iter()
            .filter(|ingredient| {
                needle
                    .as_deref()
                    .is_none_or(|needle| ingredient.name.to_lowercase().contains(needle))
            })
            .collect())
    }

    async fn get_ingredient(&self, ingredient_id: Uuid) -> Result<Ingredient, Error> {
        fixture_ingredients()?
            .into_iter()
            .find(|ingredient| ingredient.id == ingredient_id)
            .ok_or_else(|| Error::not_found(format!("ingredient {ingredient_id} not found")))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, Error> {
        fixture_tags()
    }

    async fn get_tag(&self, tag_id: Uuid) -> Result<Tag, Error> {
        fixture_tags()?
            .into_iter()
            .find(|tag| tag.id == tag_id)
            .ok_or_else(|| Error::not_found(format!("tag {tag_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case::all(None, 3)]
    #[case::fragment(Some("LOU"), 1)]
    #[case::nothing(Some("saffron"), 0)]
    #[tokio::test]
    async fn fixture_filters_ingredients_by_name(
        #[case] needle: Option<&str>,
        #[case] expected: usize,
    ) {
        let found = FixtureCatalogueQuery
            .list_ingredients(needle.map(str::to_owned))
            .await
            .expect("fixture ingredients");
        assert_eq!(found.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_unknown_tag_is_not_found() {
        let err = FixtureCatalogueQuery
            .get_tag(Uuid::nil())
            .await
            .expect_err("unknown tag");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
