//! OpenAPI documentation for the REST API.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` together with
//! its DTO schemas. Swagger UI serves it at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::catalogue::{IngredientBody, TagBody};
use crate::inbound::http::recipes_dto::{
    IngredientAmountRequest, RecipeBody, RecipeIngredientBody, RecipeMiniBody, RecipePageBody,
    RecipeRequest, RecipeWriteBody,
};
use crate::inbound::http::users_dto::{
    SubscriptionBody, SubscriptionPageBody, UserBody, UserPageBody,
};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted cookie session holding the signed-in user id.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe book API",
        description = "Recipes, ingredients, tags, favourites, shopping carts and author subscriptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::catalogue::list_ingredients,
        crate::inbound::http::catalogue::get_ingredient,
        crate::inbound::http::catalogue::list_tags,
        crate::inbound::http::catalogue::get_tag,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::recipes::add_favorite,
        crate::inbound::http::recipes::remove_favorite,
        crate::inbound::http::recipes::add_to_shopping_cart,
        crate::inbound::http::recipes::remove_from_shopping_cart,
        crate::inbound::http::recipes::download_shopping_cart,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_subscriptions,
        crate::inbound::http::users::subscribe,
        crate::inbound::http::users::unsubscribe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        IngredientBody,
        TagBody,
        RecipeBody,
        RecipeWriteBody,
        RecipeIngredientBody,
        RecipeMiniBody,
        RecipePageBody,
        RecipeRequest,
        IngredientAmountRequest,
        UserBody,
        UserPageBody,
        SubscriptionBody,
        SubscriptionPageBody,
    )),
    tags(
        (name = "catalogue", description = "Ingredients and tags"),
        (name = "recipes", description = "Recipes, favourites and the shopping cart"),
        (name = "users", description = "User profiles and subscriptions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
