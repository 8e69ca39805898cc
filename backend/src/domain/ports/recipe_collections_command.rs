//! Driving port for favorites and shopping-cart membership.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Recipe, RecipeCollection, UserId};

/// Add recipes to, or remove them from, a user's collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCollectionsCommand: Send + Sync {
    /// Add a recipe to `collection`.
    ///
    /// Unknown recipes are `not_found`; a recipe already in the collection
    /// is `invalid_request`. Returns the recipe for rendering.
    async fn add_recipe(
        &self,
        collection: RecipeCollection,
        user_id: UserId,
        recipe_id: Uuid,
    ) -> Result<Recipe, Error>;

    /// Remove a recipe from `collection`; an absent row is `not_found`.
    async fn remove_recipe(
        &self,
        collection: RecipeCollection,
        user_id: UserId,
        recipe_id: Uuid,
    ) -> Result<(), Error>;
}

/// Fixture command used when no storage is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeCollectionsCommand;

#[async_trait]
impl RecipeCollectionsCommand for FixtureRecipeCollectionsCommand {
    async fn add_recipe(
        &self,
        _collection: RecipeCollection,
        _user_id: UserId,
        recipe_id: Uuid,
    ) -> Result<Recipe, Error> {
        Err(Error::not_found(format!("recipe {recipe_id} not found")))
    }

    async fn remove_recipe(
        &self,
        collection: RecipeCollection,
        _user_id: UserId,
        recipe_id: Uuid,
    ) -> Result<(), Error> {
        Err(Error::not_found(format!(
            "recipe {recipe_id} is not in {}",
            collection.label()
        )))
    }
}
