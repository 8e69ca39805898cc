//! PostgreSQL-backed ingredient and tag catalogue adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{Ingredient, IngredientDraft, Tag, TagDraft};

use super::diesel_helpers::{contains_pattern, map_basic_diesel_error, map_basic_pool_error};
use super::models::{IngredientRow, TagRow};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, tags};

/// Diesel-backed implementation of [`CatalogueRepository`].
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
    /// let repo = DieselCatalogueRepository::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    map_basic_pool_error(error, CatalogueRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

pub(super) fn row_to_ingredient(row: IngredientRow) -> Result<Ingredient, String> {
    Ingredient::new(IngredientDraft {
        id: row.id,
        name: row.name,
        measurement_unit: row.measurement_unit,
    })
    .map_err(|err| format!("invalid ingredient row: {err}"))
}

pub(super) fn row_to_tag(row: TagRow) -> Result<Tag, String> {
    Tag::new(TagDraft {
        id: row.id,
        name: row.name,
        color: row.color,
        slug: row.slug,
    })
    .map_err(|err| format!("invalid tag row: {err}"))
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_ingredients(
        &self,
        name_contains: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = ingredients::table
            .select(IngredientRow::as_select())
            .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
            .into_boxed();
        if let Some(needle) = name_contains.as_deref() {
            query = query.filter(ingredients::name.ilike(contains_pattern(needle)));
        }

        let rows: Vec<IngredientRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter()
            .map(row_to_ingredient)
            .collect::<Result<_, _>>()
            .map_err(CatalogueRepositoryError::query)
    }

    async fn find_ingredient(
        &self,
        ingredient_id: &Uuid,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IngredientRow> = ingredients::table
            .find(ingredient_id)
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_ingredient)
            .transpose()
            .map_err(CatalogueRepositoryError::query)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TagRow> = tags::table
            .select(TagRow::as_select())
            .order(tags::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(row_to_tag)
            .collect::<Result<_, _>>()
            .map_err(CatalogueRepositoryError::query)
    }

    async fn find_tag(&self, tag_id: &Uuid) -> Result<Option<Tag>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TagRow> = tags::table
            .find(tag_id)
            .select(TagRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_tag)
            .transpose()
            .map_err(CatalogueRepositoryError::query)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion tests; query behaviour needs a live database.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ingredient_row_converts() {
        let id = Uuid::new_v4();
        let ingredient = row_to_ingredient(IngredientRow {
            id,
            name: "egg".into(),
            measurement_unit: "pcs".into(),
        })
        .expect("valid row");
        assert_eq!(ingredient.id, id);
        assert_eq!(ingredient.measurement_unit, "pcs");
    }

    #[rstest]
    fn malformed_tag_row_is_reported() {
        let err = row_to_tag(TagRow {
            id: Uuid::new_v4(),
            name: "Dinner".into(),
            color: "red".into(),
            slug: "dinner".into(),
        })
        .expect_err("bad colour");
        assert!(err.starts_with("invalid tag row"));
    }
}
