//! PostgreSQL-backed favorites and shopping-cart relations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{RecipeMembershipRepository, RecipeMembershipRepositoryError};
use crate::domain::{CartIngredient, MembershipSets, RecipeCollection, UserId};

use super::diesel_helpers::{
    Violation, column_to_u32, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewFavoriteRow, NewShoppingCartRow};
use super::pool::{DbPool, PoolError};
use super::schema::{favorites, ingredients, recipe_ingredients, shopping_cart};

/// Diesel-backed implementation of [`RecipeMembershipRepository`].
#[derive(Clone)]
pub struct DieselRecipeMembershipRepository {
    pool: DbPool,
}

impl DieselRecipeMembershipRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecipeMembershipRepositoryError {
    map_basic_pool_error(error, RecipeMembershipRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeMembershipRepositoryError {
    map_basic_diesel_error(
        error,
        RecipeMembershipRepositoryError::query,
        RecipeMembershipRepositoryError::connection,
    )
}

/// Translate an insert failure, recognising the pair key and the recipe
/// foreign key.
fn map_insert_error(
    error: diesel::result::Error,
    recipe_id: Uuid,
) -> RecipeMembershipRepositoryError {
    match constraint_violation(&error) {
        Some(Violation::Unique { .. }) => RecipeMembershipRepositoryError::duplicate(recipe_id),
        Some(violation @ Violation::ForeignKey { .. }) if violation.mentions("recipe_id") => {
            RecipeMembershipRepositoryError::recipe_not_found(recipe_id)
        }
        _ => map_diesel_error(error),
    }
}

#[async_trait]
impl RecipeMembershipRepository for DieselRecipeMembershipRepository {
    async fn add(
        &self,
        collection: RecipeCollection,
        user_id: &UserId,
        recipe_id: &Uuid,
    ) -> Result<(), RecipeMembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = *user_id.as_uuid();
        let recipe_id = *recipe_id;

        let inserted = match collection {
            RecipeCollection::Favorites => {
                diesel::insert_into(favorites::table)
                    .values(&NewFavoriteRow { user_id, recipe_id })
                    .execute(&mut conn)
                    .await
            }
            RecipeCollection::ShoppingCart => {
                diesel::insert_into(shopping_cart::table)
                    .values(&NewShoppingCartRow { user_id, recipe_id })
                    .execute(&mut conn)
                    .await
            }
        };

        inserted
            .map(|_| ())
            .map_err(|err| map_insert_error(err, recipe_id))
    }

    async fn remove(
        &self,
        collection: RecipeCollection,
        user_id: &UserId,
        recipe_id: &Uuid,
    ) -> Result<bool, RecipeMembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = user_id.as_uuid();

        let deleted = match collection {
            RecipeCollection::Favorites => {
                diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(user_id))
                        .filter(favorites::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await
            }
            RecipeCollection::ShoppingCart => {
                diesel::delete(
                    shopping_cart::table
                        .filter(shopping_cart::user_id.eq(user_id))
                        .filter(shopping_cart::recipe_id.eq(recipe_id)),
                )
                .execute(&mut conn)
                .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn memberships_among(
        &self,
        user_id: &UserId,
        recipe_ids: &[Uuid],
    ) -> Result<MembershipSets, RecipeMembershipRepositoryError> {
        if recipe_ids.is_empty() {
            return Ok(MembershipSets::default());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_id = user_id.as_uuid();

        let favorited: Vec<Uuid> = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::recipe_id.eq_any(recipe_ids))
            .select(favorites::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let in_cart: Vec<Uuid> = shopping_cart::table
            .filter(shopping_cart::user_id.eq(user_id))
            .filter(shopping_cart::recipe_id.eq_any(recipe_ids))
            .select(shopping_cart::recipe_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(MembershipSets {
            favorited: favorited.into_iter().collect(),
            in_cart: in_cart.into_iter().collect(),
        })
    }

    async fn cart_ingredients(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CartIngredient>, RecipeMembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let cart_recipes = shopping_cart::table
            .filter(shopping_cart::user_id.eq(user_id.as_uuid()))
            .select(shopping_cart::recipe_id);
        let rows: Vec<(String, String, i32)> = recipe_ingredients::table
            .inner_join(ingredients::table)
            .filter(recipe_ingredients::recipe_id.eq_any(cart_recipes))
            .order((
                ingredients::name.asc(),
                recipe_ingredients::recipe_id.asc(),
                recipe_ingredients::position.asc(),
            ))
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(name, unit, amount)| {
                column_to_u32(amount, "recipe_ingredients.amount")
                    .map(|amount| CartIngredient::new(name, unit, amount))
            })
            .collect::<Result<_, _>>()
            .map_err(RecipeMembershipRepositoryError::query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::diesel_helpers::violation;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case::favorites_pair("favorites_pkey")]
    #[case::cart_pair("shopping_cart_pkey")]
    fn pair_key_violation_is_a_duplicate(#[case] constraint: &'static str) {
        let recipe_id = Uuid::new_v4();
        let error = violation(DatabaseErrorKind::UniqueViolation, constraint);
        assert_eq!(
            map_insert_error(error, recipe_id),
            RecipeMembershipRepositoryError::duplicate(recipe_id)
        );
    }

    #[rstest]
    #[case::favorites("favorites_recipe_id_fkey")]
    #[case::cart("shopping_cart_recipe_id_fkey")]
    fn missing_recipe_is_reported_by_id(#[case] constraint: &'static str) {
        let recipe_id = Uuid::new_v4();
        let error = violation(DatabaseErrorKind::ForeignKeyViolation, constraint);
        assert_eq!(
            map_insert_error(error, recipe_id),
            RecipeMembershipRepositoryError::recipe_not_found(recipe_id)
        );
    }

    #[rstest]
    fn missing_user_is_a_query_failure() {
        let error = violation(DatabaseErrorKind::ForeignKeyViolation, "favorites_user_id_fkey");
        assert!(matches!(
            map_insert_error(error, Uuid::new_v4()),
            RecipeMembershipRepositoryError::Query { .. }
        ));
    }
}
