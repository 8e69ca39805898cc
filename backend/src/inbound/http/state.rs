//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogueQuery, FixtureCatalogueQuery, FixtureRecipeCollectionsCommand,
    FixtureRecipesCommand, FixtureRecipesQuery, FixtureShoppingListQuery,
    FixtureSubscriptionsCommand, FixtureSubscriptionsQuery, FixtureUsersQuery,
    RecipeCollectionsCommand, RecipesCommand, RecipesQuery, ShoppingListQuery,
    SubscriptionsCommand, SubscriptionsQuery, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub recipes: Arc<dyn RecipesQuery>,
    pub recipes_command: Arc<dyn RecipesCommand>,
    pub collections: Arc<dyn RecipeCollectionsCommand>,
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub subscriptions: Arc<dyn SubscriptionsCommand>,
    pub subscriptions_query: Arc<dyn SubscriptionsQuery>,
}

impl HttpState {
    /// State wired entirely to fixture ports.
    ///
    /// Used when no database is configured and as the starting point for
    /// handler tests, which override the ports they exercise.
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_book::domain::ports::FixtureCatalogueQuery;
    /// use recipe_book::inbound::http::state::HttpState;
    ///
    /// let state = HttpState {
    ///     catalogue: Arc::new(FixtureCatalogueQuery),
    ///     ..HttpState::fixtures()
    /// };
    /// let _catalogue = state.catalogue.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self {
            catalogue: Arc::new(FixtureCatalogueQuery),
            recipes: Arc::new(FixtureRecipesQuery),
            recipes_command: Arc::new(FixtureRecipesCommand),
            collections: Arc::new(FixtureRecipeCollectionsCommand),
            shopping_list: Arc::new(FixtureShoppingListQuery),
            users: Arc::new(FixtureUsersQuery),
            subscriptions: Arc::new(FixtureSubscriptionsCommand),
            subscriptions_query: Arc::new(FixtureSubscriptionsQuery),
        }
    }
}
