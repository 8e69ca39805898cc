//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services implementing the driving ports.
//! Keep types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - Recipe / RecipeContent: stored recipe and its validated write payload.
//! - ShoppingList / aggregate_ingredients: cart aggregation.
//! - MembershipAnnotator: favorite and cart flags for recipe listings.

pub mod catalogue;
mod catalogue_service;
mod collections_service;
pub mod error;
pub mod membership;
pub mod page;
pub mod ports;
pub mod recipe;
mod recipes_service;
pub mod shopping_list;
pub(crate) mod slug;
pub mod subscription;
pub mod trace_id;
pub mod user;
mod users_service;

pub use self::catalogue::{
    CATALOGUE_TEXT_MAX, CatalogueValidationError, Ingredient, IngredientDraft, Tag, TagDraft,
};
pub use self::catalogue_service::CatalogueService;
pub use self::collections_service::RecipeCollectionsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::membership::{
    MembershipAnnotator, MembershipSets, RecipeCollection, RecipeMembership,
};
pub use self::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use self::recipe::{
    AnnotatedRecipe, IngredientAmount, MAX_AMOUNT, MIN_AMOUNT, MIN_COOKING_TIME,
    RECIPE_NAME_MAX, Recipe, RecipeContent, RecipeDraft, RecipeFilter, RecipeIngredient,
    RecipeValidationError,
};
pub use self::recipes_service::RecipesService;
pub use self::shopping_list::{
    CartIngredient, EMPTY_SHOPPING_LIST, ShoppingList, ShoppingListLine, aggregate_ingredients,
};
pub use self::subscription::{DEFAULT_SUBSCRIPTION_RECIPES, Subscription, UserProfile};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserId, UserValidationError, Username};
pub use self::users_service::UsersService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_book::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
