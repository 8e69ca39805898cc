//! Recipe domain service.
//!
//! Implements the recipe driving ports. Reads are annotated for the viewer
//! passed in by the caller. Updates and deletes confirm the actor may touch
//! the recipe, and every write validates its payload before anything reaches
//! the repository.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{
    FollowRepository, RecipeMembershipRepository, RecipeRepository, RecipeRepositoryError,
    RecipesCommand, RecipesQuery, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AnnotatedRecipe, Error, MembershipAnnotator, Page, Recipe, RecipeContent, RecipeDraft,
    RecipeFilter, RecipeValidationError, UserId,
};

/// Recipe service implementing [`RecipesQuery`] and [`RecipesCommand`].
#[derive(Clone)]
pub struct RecipesService<R, M, F, U> {
    recipe_repo: Arc<R>,
    annotator: MembershipAnnotator<M>,
    follow_repo: Arc<F>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, M, F, U> RecipesService<R, M, F, U> {
    /// Create a new service with the given repositories.
    pub fn new(
        recipe_repo: Arc<R>,
        membership_repo: Arc<M>,
        follow_repo: Arc<F>,
        user_repo: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            recipe_repo,
            annotator: MembershipAnnotator::new(membership_repo),
            follow_repo,
            user_repo,
            clock,
        }
    }
}

pub(crate) fn map_recipe_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe repository error: {message}"))
        }
        RecipeRepositoryError::UnknownIngredient { ingredient_id } => {
            Error::invalid_request(format!("ingredient {ingredient_id} does not exist"))
                .with_details(json!({
                    "field": "ingredients",
                    "ingredientId": ingredient_id,
                    "code": "unknown_ingredient",
                }))
        }
        RecipeRepositoryError::UnknownTag { tag_id } => {
            Error::invalid_request(format!("tag {tag_id} does not exist")).with_details(json!({
                "field": "tags",
                "tagId": tag_id,
                "code": "unknown_tag",
            }))
        }
        RecipeRepositoryError::RecipeNotFound { recipe_id } => recipe_not_found(recipe_id),
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn recipe_not_found(recipe_id: Uuid) -> Error {
    Error::not_found(format!("recipe {recipe_id} not found"))
}

fn map_validation_error(error: RecipeValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": "invalid_recipe",
    }))
}

impl<R, M, F, U> RecipesService<R, M, F, U>
where
    R: RecipeRepository,
    M: RecipeMembershipRepository,
    F: FollowRepository,
    U: UserRepository,
{
    async fn load(&self, recipe_id: Uuid) -> Result<Recipe, Error> {
        self.recipe_repo
            .find_by_id(&recipe_id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(recipe_id))
    }

    /// Authors or administrators may modify a recipe.
    async fn authorize(&self, actor: &UserId, recipe: &Recipe) -> Result<(), Error> {
        if recipe.is_authored_by(actor) {
            return Ok(());
        }
        let is_admin = self
            .user_repo
            .find_by_id(actor)
            .await
            .map_err(map_user_error)?
            .is_some_and(|user| user.is_admin());
        if is_admin {
            Ok(())
        } else {
            Err(Error::forbidden("only the author may modify this recipe").with_details(
                json!({ "recipeId": recipe.id, "code": "not_recipe_author" }),
            ))
        }
    }

    async fn subscribed_authors(&self, recipes: &[Recipe], viewer: &UserId) -> HashSet<UserId> {
        let authors: Vec<UserId> = recipes
            .iter()
            .map(|recipe| recipe.author.id().clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if authors.is_empty() {
            return HashSet::new();
        }
        match self.follow_repo.followed_among(viewer, &authors).await {
            Ok(followed) => followed,
            Err(error) => {
                warn!(%error, viewer = %viewer, "subscription lookup failed; flags cleared");
                HashSet::new()
            }
        }
    }

    async fn annotate(
        &self,
        recipes: Vec<Recipe>,
        viewer: Option<&UserId>,
    ) -> Vec<AnnotatedRecipe> {
        let ids: Vec<Uuid> = recipes.iter().map(|recipe| recipe.id).collect();
        let flags = self.annotator.annotate(&ids, viewer).await;
        let followed = match viewer {
            Some(viewer) => self.subscribed_authors(&recipes, viewer).await,
            None => HashSet::new(),
        };

        recipes
            .into_iter()
            .map(|recipe| AnnotatedRecipe {
                membership: flags.get(&recipe.id).copied().unwrap_or_default(),
                author_subscribed: followed.contains(recipe.author.id()),
                recipe,
            })
            .collect()
    }
}

#[async_trait]
impl<R, M, F, U> RecipesQuery for RecipesService<R, M, F, U>
where
    R: RecipeRepository,
    M: RecipeMembershipRepository,
    F: FollowRepository,
    U: UserRepository,
{
    async fn list_recipes(
        &self,
        filter: RecipeFilter,
        viewer: Option<UserId>,
    ) -> Result<Page<AnnotatedRecipe>, Error> {
        let page = self
            .recipe_repo
            .list(&filter)
            .await
            .map_err(map_recipe_error)?;
        let items = self.annotate(page.items, viewer.as_ref()).await;
        Ok(Page {
            items,
            total: page.total,
        })
    }

    async fn get_recipe(
        &self,
        recipe_id: Uuid,
        viewer: Option<UserId>,
    ) -> Result<AnnotatedRecipe, Error> {
        let recipe = self.load(recipe_id).await?;
        self.annotate(vec![recipe], viewer.as_ref())
            .await
            .into_iter()
            .next()
            .ok_or_else(|| recipe_not_found(recipe_id))
    }
}

#[async_trait]
impl<R, M, F, U> RecipesCommand for RecipesService<R, M, F, U>
where
    R: RecipeRepository,
    M: RecipeMembershipRepository,
    F: FollowRepository,
    U: UserRepository,
{
    async fn create_recipe(&self, author: UserId, draft: RecipeDraft) -> Result<Recipe, Error> {
        let content = RecipeContent::new(draft).map_err(map_validation_error)?;
        self.recipe_repo
            .create(&author, &content, self.clock.utc())
            .await
            .map_err(map_recipe_error)
    }

    async fn update_recipe(
        &self,
        actor: UserId,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> Result<Recipe, Error> {
        let existing = self.load(recipe_id).await?;
        self.authorize(&actor, &existing).await?;
        let content = RecipeContent::new(draft).map_err(map_validation_error)?;
        self.recipe_repo
            .update(&recipe_id, &content)
            .await
            .map_err(map_recipe_error)
    }

    async fn delete_recipe(&self, actor: UserId, recipe_id: Uuid) -> Result<(), Error> {
        let existing = self.load(recipe_id).await?;
        self.authorize(&actor, &existing).await?;
        let deleted = self
            .recipe_repo
            .delete(&recipe_id)
            .await
            .map_err(map_recipe_error)?;
        if deleted {
            Ok(())
        } else {
            Err(recipe_not_found(recipe_id))
        }
    }
}

#[cfg(test)]
#[path = "recipes_service_tests.rs"]
mod tests;
