//! Favorites, shopping cart and shopping list service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use super::recipes_service::{map_recipe_error, map_user_error, recipe_not_found};
use crate::domain::ports::{
    RecipeCollectionsCommand, RecipeMembershipRepository, RecipeMembershipRepositoryError,
    RecipeRepository, ShoppingListQuery, UserRepository,
};
use crate::domain::{Error, Recipe, RecipeCollection, ShoppingList, UserId};

/// Implements [`RecipeCollectionsCommand`] and [`ShoppingListQuery`].
#[derive(Clone)]
pub struct RecipeCollectionsService<R, M, U> {
    recipe_repo: Arc<R>,
    membership_repo: Arc<M>,
    user_repo: Arc<U>,
}

impl<R, M, U> RecipeCollectionsService<R, M, U> {
    /// Create a new service with the given repositories.
    pub fn new(recipe_repo: Arc<R>, membership_repo: Arc<M>, user_repo: Arc<U>) -> Self {
        Self {
            recipe_repo,
            membership_repo,
            user_repo,
        }
    }
}

fn map_membership_error(
    collection: RecipeCollection,
    error: RecipeMembershipRepositoryError,
) -> Error {
    match error {
        RecipeMembershipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("membership repository unavailable: {message}"))
        }
        RecipeMembershipRepositoryError::Query { message } => {
            Error::internal(format!("membership repository error: {message}"))
        }
        RecipeMembershipRepositoryError::Duplicate { recipe_id } => {
            Error::invalid_request(format!("recipe is already in {}", collection.label()))
                .with_details(json!({
                    "recipeId": recipe_id,
                    "code": "already_in_collection",
                }))
        }
        RecipeMembershipRepositoryError::RecipeNotFound { recipe_id } => {
            recipe_not_found(recipe_id)
        }
    }
}

#[async_trait]
impl<R, M, U> RecipeCollectionsCommand for RecipeCollectionsService<R, M, U>
where
    R: RecipeRepository,
    M: RecipeMembershipRepository,
    U: UserRepository,
{
    async fn add_recipe(
        &self,
        collection: RecipeCollection,
        user_id: UserId,
        recipe_id: Uuid,
    ) -> Result<Recipe, Error> {
        let recipe = self
            .recipe_repo
            .find_by_id(&recipe_id)
            .await
            .map_err(map_recipe_error)?
            .ok_or_else(|| recipe_not_found(recipe_id))?;
        self.membership_repo
            .add(collection, &user_id, &recipe_id)
            .await
            .map_err(|err| map_membership_error(collection, err))?;
        Ok(recipe)
    }

    async fn remove_recipe(
        &self,
        collection: RecipeCollection,
        user_id: UserId,
        recipe_id: Uuid,
    ) -> Result<(), Error> {
        let removed = self
            .membership_repo
            .remove(collection, &user_id, &recipe_id)
            .await
            .map_err(|err| map_membership_error(collection, err))?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(format!(
                "recipe {recipe_id} is not in {}",
                collection.label()
            )))
        }
    }
}

#[async_trait]
impl<R, M, U> ShoppingListQuery for RecipeCollectionsService<R, M, U>
where
    R: RecipeRepository,
    M: RecipeMembershipRepository,
    U: UserRepository,
{
    async fn shopping_list(&self, user_id: UserId) -> Result<ShoppingList, Error> {
        let owner = self
            .user_repo
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(format!("user {user_id} is not known")))?;
        let rows = self
            .membership_repo
            .cart_ingredients(&user_id)
            .await
            .map_err(|err| map_membership_error(RecipeCollection::ShoppingCart, err))?;
        Ok(ShoppingList::from_cart(owner.username().clone(), rows))
    }
}
