//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! report failures through `define_port_error!` enums. Driving ports
//! (`*Query`, `*Command`) are implemented by domain services and consumed by
//! inbound adapters; they report failures as [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_query;
mod catalogue_repository;
mod follow_repository;
mod recipe_collections_command;
mod recipe_membership_repository;
mod recipe_repository;
mod recipes_command;
mod recipes_query;
mod shopping_list_query;
mod subscriptions_command;
mod subscriptions_query;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::{CatalogueQuery, FixtureCatalogueQuery};
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{
    CatalogueRepository, CatalogueRepositoryError, FixtureCatalogueRepository,
};
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
pub use follow_repository::{FixtureFollowRepository, FollowRepository, FollowRepositoryError};
#[cfg(test)]
pub use recipe_collections_command::MockRecipeCollectionsCommand;
pub use recipe_collections_command::{
    FixtureRecipeCollectionsCommand, RecipeCollectionsCommand,
};
#[cfg(test)]
pub use recipe_membership_repository::MockRecipeMembershipRepository;
pub use recipe_membership_repository::{
    FixtureRecipeMembershipRepository, RecipeMembershipRepository,
    RecipeMembershipRepositoryError,
};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{FixtureRecipeRepository, RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::{FixtureRecipesCommand, RecipesCommand};
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::{FixtureRecipesQuery, RecipesQuery};
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::{FixtureShoppingListQuery, ShoppingListQuery};
#[cfg(test)]
pub use subscriptions_command::MockSubscriptionsCommand;
pub use subscriptions_command::{FixtureSubscriptionsCommand, SubscriptionsCommand};
#[cfg(test)]
pub use subscriptions_query::MockSubscriptionsQuery;
pub use subscriptions_query::{FixtureSubscriptionsQuery, SubscriptionsQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UsersQuery};

#[cfg(test)]
mod tests;
