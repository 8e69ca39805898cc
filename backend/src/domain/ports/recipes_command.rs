//! Driving port for recipe writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Recipe, RecipeDraft, UserId};

/// Write-side recipe use cases.
///
/// Updates and deletes are restricted to the recipe's author and to
/// administrators; anyone else receives `forbidden`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Validate and store a new recipe written by `author`.
    async fn create_recipe(&self, author: UserId, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Validate and replace an existing recipe.
    async fn update_recipe(
        &self,
        actor: UserId,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error>;

    /// Delete a recipe.
    async fn delete_recipe(&self, actor: UserId, recipe_id: Uuid) -> Result<(), Error>;
}

/// Fixture command used when no storage is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipesCommand;

#[async_trait]
impl RecipesCommand for FixtureRecipesCommand {
    async fn create_recipe(&self, _author: UserId, _draft: RecipeDraft) -> Result<Recipe, Error> {
        Err(Error::service_unavailable("recipe storage is not configured"))
    }

    async fn update_recipe(
        &self,
        _actor: UserId,
        recipe_id: Uuid,
        _draft: RecipeDraft,
    ) -> Result<Recipe, Error> {
        Err(Error::not_found(format!("recipe {recipe_id} not found")))
    }

    async fn delete_recipe(&self, _actor: UserId, recipe_id: Uuid) -> Result<(), Error> {
        Err(Error::not_found(format!("recipe {recipe_id} not found")))
    }
}
