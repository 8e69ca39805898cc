//! Port for favorite and shopping-cart rows.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CartIngredient, MembershipSets, RecipeCollection, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by membership repository adapters.
    pub enum RecipeMembershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "membership repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "membership repository query failed: {message}",
        /// The `(user, recipe)` pair already exists in the collection.
        Duplicate { recipe_id: Uuid } =>
            "recipe {recipe_id} is already in the collection",
        /// The referenced recipe does not exist.
        RecipeNotFound { recipe_id: Uuid } =>
            "recipe {recipe_id} does not exist",
    }
}

/// Port over the per-user favorites and cart relations.
///
/// Both relations carry a unique `(user, recipe)` constraint; adapters
/// surface a violation as [`RecipeMembershipRepositoryError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeMembershipRepository: Send + Sync {
    /// Insert a `(user, recipe)` row into `collection`.
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: &UserId,
        recipe_id: &Uuid,
    ) -> Result<(), RecipeMembershipRepositoryError>;

    /// Remove a row. Returns `false` when the row was absent.
    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: &UserId,
        recipe_id: &Uuid,
    ) -> Result<bool, RecipeMembershipRepositoryError>;

    /// Which of `recipe_ids` the user has favorited or put in the cart.
    ///
    /// One query per relation, independent of `recipe_ids.len()`.
    async fn memberships_among(
        &self,
        user_id: &UserId,
        recipe_ids: &[Uuid],
    ) -> Result<MembershipSets, RecipeMembershipRepositoryError>;

    /// Every ingredient row of every recipe in the user's cart, ordered by
    /// ingredient name then recipe.
    async fn cart_ingredients(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CartIngredient>, RecipeMembershipRepositoryError>;
}

/// Fixture implementation holding no rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeMembershipRepository;

#[async_trait]
impl RecipeMembershipRepository for FixtureRecipeMembershipRepository {
    async fn add(
        &self,
        _collection: RecipeCollection,
        _user_id: &UserId,
        recipe_id: &Uuid,
    ) -> Result<(), RecipeMembershipRepositoryError> {
        Err(RecipeMembershipRepositoryError::recipe_not_found(*recipe_id))
    }

    async fn remove(
        &self,
        _collection: RecipeCollection,
        _user_id: &UserId,
        _recipe_id: &Uuid,
    ) -> Result<bool, RecipeMembershipRepositoryError> {
        Ok(false)
    }

    async fn memberships_among(
        &self,
        _user_id: &UserId,
        _recipe_ids: &[Uuid],
    ) -> Result<MembershipSets, RecipeMembershipRepositoryError> {
        Ok(MembershipSets::default())
    }

    async fn cart_ingredients(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<CartIngredient>, RecipeMembershipRepositoryError> {
        Ok(Vec::new())
    }
}
