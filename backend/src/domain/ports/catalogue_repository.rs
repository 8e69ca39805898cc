//! Port for ingredient and tag reference data.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Ingredient, Tag};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading catalogue data.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "catalogue repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "catalogue repository query failed: {message}",
    }
}

/// Read-only access to ingredients and tags.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Ingredients ordered by name. When `name_contains` is set, only
    /// ingredients whose name contains it (case-insensitively) are returned.
    async fn list_ingredients(
        &self,
        name_contains: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError>;

    /// Fetch one ingredient.
    async fn find_ingredient(
        &self,
        ingredient_id: &Uuid,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError>;

    /// Every tag ordered by name.
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError>;

    /// Fetch one tag.
    async fn find_tag(&self, tag_id: &Uuid) -> Result<Option<Tag>, CatalogueRepositoryError>;
}

/// Fixture repository with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueRepository;

#[async_trait]
impl CatalogueRepository for FixtureCatalogueRepository {
    async fn list_ingredients(
        &self,
        _name_contains: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_ingredient(
        &self,
        _ingredient_id: &Uuid,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        Ok(None)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_tag(&self, _tag_id: &Uuid) -> Result<Option<Tag>, CatalogueRepositoryError> {
        Ok(None)
    }
}
