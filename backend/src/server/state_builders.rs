//! Wiring of domain services onto the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use recipe_book::domain::{
    CatalogueService, RecipeCollectionsService, RecipesService, UsersService,
};
use recipe_book::inbound::http::state::HttpState;
use recipe_book::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselFollowRepository, DieselRecipeMembershipRepository,
    DieselRecipeRepository, DieselUserRepository,
};

/// Build handler state from the optional pool.
///
/// Without a pool every port is served by its fixture implementation.
pub(super) fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => build_persistent_state(pool),
        None => HttpState::fixtures(),
    }
}

fn build_persistent_state(pool: &DbPool) -> HttpState {
    let catalogue_repo = Arc::new(DieselCatalogueRepository::new(pool.clone()));
    let recipe_repo = Arc::new(DieselRecipeRepository::new(pool.clone()));
    let membership_repo = Arc::new(DieselRecipeMembershipRepository::new(pool.clone()));
    let follow_repo = Arc::new(DieselFollowRepository::new(pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));

    let recipes = Arc::new(RecipesService::new(
        recipe_repo.clone(),
        membership_repo.clone(),
        follow_repo.clone(),
        user_repo.clone(),
        Arc::new(DefaultClock),
    ));
    let collections = Arc::new(RecipeCollectionsService::new(
        recipe_repo.clone(),
        membership_repo,
        user_repo.clone(),
    ));
    let users = Arc::new(UsersService::new(user_repo, follow_repo, recipe_repo));

    HttpState {
        catalogue: Arc::new(CatalogueService::new(catalogue_repo)),
        recipes: recipes.clone(),
        recipes_command: recipes,
        collections: collections.clone(),
        shopping_list: collections,
        users: users.clone(),
        subscriptions: users.clone(),
        subscriptions_query: users,
    }
}
