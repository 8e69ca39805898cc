//! Port for recipe persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Page, Recipe, RecipeContent, RecipeFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
        /// A referenced ingredient does not exist.
        UnknownIngredient { ingredient_id: Uuid } =>
            "ingredient {ingredient_id} does not exist",
        /// A referenced tag does not exist.
        UnknownTag { tag_id: Uuid } =>
            "tag {tag_id} does not exist",
        /// The recipe being written does not exist.
        RecipeNotFound { recipe_id: Uuid } =>
            "recipe {recipe_id} does not exist",
    }
}

/// Port for reading and writing recipes with their tags and ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Fetch one recipe with author, tags and ingredients resolved.
    async fn find_by_id(&self, recipe_id: &Uuid) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// List recipes matching `filter`, newest first.
    async fn list(&self, filter: &RecipeFilter) -> Result<Page<Recipe>, RecipeRepositoryError>;

    /// Newest `per_author` recipes of each author in `authors`, with the
    /// author's full recipe count as the page total. Authors without recipes
    /// may be absent from the map.
    async fn latest_by_authors(
        &self,
        authors: &[UserId],
        per_author: u32,
    ) -> Result<HashMap<UserId, Page<Recipe>>, RecipeRepositoryError>;

    /// Insert a recipe together with its tag links and ingredient rows.
    async fn create(
        &self,
        author: &UserId,
        content: &RecipeContent,
        created_at: DateTime<Utc>,
    ) -> Result<Recipe, RecipeRepositoryError>;

    /// Overwrite a recipe's fields and replace its tag links and ingredient
    /// rows atomically.
    async fn update(
        &self,
        recipe_id: &Uuid,
        content: &RecipeContent,
    ) -> Result<Recipe, RecipeRepositoryError>;

    /// Delete a recipe. Returns `false` when nothing was deleted.
    async fn delete(&self, recipe_id: &Uuid) -> Result<bool, RecipeRepositoryError>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeRepository;

#[async_trait]
impl RecipeRepository for FixtureRecipeRepository {
    async fn find_by_id(
        &self,
        _recipe_id: &Uuid,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _filter: &RecipeFilter) -> Result<Page<Recipe>, RecipeRepositoryError> {
        Ok(Page::empty())
    }

    async fn latest_by_authors(
        &self,
        _authors: &[UserId],
        _per_author: u32,
    ) -> Result<HashMap<UserId, Page<Recipe>>, RecipeRepositoryError> {
        Ok(HashMap::new())
    }

    async fn create(
        &self,
        _author: &UserId,
        _content: &RecipeContent,
        _created_at: DateTime<Utc>,
    ) -> Result<Recipe, RecipeRepositoryError> {
        Err(RecipeRepositoryError::connection(
            "recipe storage is not configured",
        ))
    }

    async fn update(
        &self,
        recipe_id: &Uuid,
        _content: &RecipeContent,
    ) -> Result<Recipe, RecipeRepositoryError> {
        Err(RecipeRepositoryError::recipe_not_found(*recipe_id))
    }

    async fn delete(&self, _recipe_id: &Uuid) -> Result<bool, RecipeRepositoryError> {
        Ok(false)
    }
}
