//! Driving port for the downloadable shopping list.

use async_trait::async_trait;

use crate::domain::{Error, ShoppingList, UserId};

/// Builds the aggregated shopping list for a user's cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListQuery: Send + Sync {
    /// Aggregate every ingredient in the user's cart.
    async fn shopping_list(&self, user_id: UserId) -> Result<ShoppingList, Error>;
}

/// Fixture query used when no storage is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShoppingListQuery;

#[async_trait]
impl ShoppingListQuery for FixtureShoppingListQuery {
    async fn shopping_list(&self, user_id: UserId) -> Result<ShoppingList, Error> {
        Err(Error::unauthorized(format!("user {user_id} is not known")))
    }
}
