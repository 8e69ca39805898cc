//! Driving port for recipe reads.
//!
//! Every result is annotated relative to the viewer passed in by the caller:
//! favorite and cart flags plus whether the viewer follows the author.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AnnotatedRecipe, Error, Page, RecipeFilter, UserId};

/// Read-side recipe use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// List recipes newest first.
    async fn list_recipes(
        &self,
        filter: RecipeFilter,
        viewer: Option<UserId>,
    ) -> Result<Page<AnnotatedRecipe>, Error>;

    /// One recipe, or `not_found`.
    async fn get_recipe(
        &self,
        recipe_id: Uuid,
        viewer: Option<UserId>,
    ) -> Result<AnnotatedRecipe, Error>;
}

/// Fixture query over an empty recipe book.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipesQuery;

#[async_trait]
impl RecipesQuery for FixtureRecipesQuery {
    async fn list_recipes(
        &self,
        _filter: RecipeFilter,
        _viewer: Option<UserId>,
    ) -> Result<Page<AnnotatedRecipe>, Error> {
        Ok(Page::empty())
    }

    async fn get_recipe(
        &self,
        recipe_id: Uuid,
        _viewer: Option<UserId>,
    ) -> Result<AnnotatedRecipe, Error> {
        Err(Error::not_found(format!("recipe {recipe_id} not found")))
    }
}
