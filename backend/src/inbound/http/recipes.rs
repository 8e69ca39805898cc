//! Recipe endpoints, including favourites and the shopping cart.
//!
//! ```text
//! GET    /api/v1/recipes
//! POST   /api/v1/recipes
//! GET    /api/v1/recipes/download-shopping-cart
//! GET    /api/v1/recipes/{id}
//! PATCH  /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! POST   /api/v1/recipes/{id}/favorite
//! DELETE /api/v1/recipes/{id}/favorite
//! POST   /api/v1/recipes/{id}/shopping-cart
//! DELETE /api/v1/recipes/{id}/shopping-cart
//! ```

use actix_web::http::header::{ContentDisposition, ContentType};
use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::domain::{AnnotatedRecipe, Error, RecipeCollection};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::{
    RecipeBody, RecipeListQuery, RecipeMiniBody, RecipePageBody, RecipeRequest, RecipeView,
    RecipeViewKind, RecipeWriteBody, render_recipe,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

fn recipe_id(path: web::Path<String>) -> Result<uuid::Uuid, Error> {
    parse_uuid(&path.into_inner(), FieldName::new("id"))
}

/// List recipes newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Recipes", body = RecipePageBody),
        (status = 400, description = "Malformed filter", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<RecipeListQuery>,
) -> ApiResult<web::Json<RecipePageBody>> {
    let viewer = session.user_id()?;
    let filter = query.into_inner().into_filter(viewer.as_ref())?;
    let page = state.recipes.list_recipes(filter, viewer).await?;
    Ok(web::Json(page.into()))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = RecipeBody),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeView>> {
    let id = recipe_id(path)?;
    let viewer = session.user_id()?;
    let recipe = state.recipes.get_recipe(id, viewer).await?;
    Ok(web::Json(render_recipe(recipe, RecipeViewKind::Full)))
}

/// Create a recipe authored by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Created", body = RecipeWriteBody),
        (status = 400, description = "Invalid recipe", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let recipe = state.recipes_command.create_recipe(author, draft).await?;
    Ok(HttpResponse::Created().json(render_recipe(
        AnnotatedRecipe::unannotated(recipe),
        RecipeViewKind::Write,
    )))
}

/// Replace a recipe's content, tags and ingredients.
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Updated", body = RecipeWriteBody),
        (status = 400, description = "Invalid recipe", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[patch("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RecipeRequest>,
) -> ApiResult<web::Json<RecipeView>> {
    let actor = session.require_user_id()?;
    let id = recipe_id(path)?;
    let draft = payload.into_inner().into_draft()?;
    let recipe = state
        .recipes_command
        .update_recipe(actor, id, draft)
        .await?;
    Ok(web::Json(render_recipe(
        AnnotatedRecipe::unannotated(recipe),
        RecipeViewKind::Write,
    )))
}

/// Delete a recipe.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = recipe_id(path)?;
    state.recipes_command.delete_recipe(actor, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn add_to_collection(
    collection: RecipeCollection,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = recipe_id(path)?;
    let recipe = state.collections.add_recipe(collection, user_id, id).await?;
    Ok(HttpResponse::Created().json(render_recipe(
        AnnotatedRecipe::unannotated(recipe),
        RecipeViewKind::Mini,
    )))
}

async fn remove_from_collection(
    collection: RecipeCollection,
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let id = recipe_id(path)?;
    state
        .collections
        .remove_recipe(collection, user_id, id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a recipe to the signed-in user's favourites.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 201, description = "Added", body = RecipeMiniBody),
        (status = 400, description = "Already a favourite", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "addFavorite"
)]
#[post("/recipes/{id}/favorite")]
pub async fn add_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    add_to_collection(RecipeCollection::Favorites, state, session, path).await
}

/// Remove a recipe from the signed-in user's favourites.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/favorite",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Not a favourite", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "removeFavorite"
)]
#[delete("/recipes/{id}/favorite")]
pub async fn remove_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    remove_from_collection(RecipeCollection::Favorites, state, session, path).await
}

/// Add a recipe to the signed-in user's shopping cart.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/shopping-cart",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 201, description = "Added", body = RecipeMiniBody),
        (status = 400, description = "Already in the cart", body = Error),
        (status = 404, description = "Unknown recipe", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "addToShoppingCart"
)]
#[post("/recipes/{id}/shopping-cart")]
pub async fn add_to_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    add_to_collection(RecipeCollection::ShoppingCart, state, session, path).await
}

/// Remove a recipe from the signed-in user's shopping cart.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/shopping-cart",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Not in the cart", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "removeFromShoppingCart"
)]
#[delete("/recipes/{id}/shopping-cart")]
pub async fn remove_from_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    remove_from_collection(RecipeCollection::ShoppingCart, state, session, path).await
}

/// Download the aggregated shopping list as a text attachment.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/download-shopping-cart",
    responses(
        (status = 200, description = "Shopping list", content_type = "text/plain", body = String),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "downloadShoppingCart"
)]
#[get("/recipes/download-shopping-cart")]
pub async fn download_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let list = state.shopping_list.shopping_list(user_id).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(ContentDisposition::attachment(list.file_name()))
        .body(list.render_text()))
}

/// Register recipe routes on a scope.
///
/// The shopping-list download is registered before `/recipes/{id}` so the
/// literal segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(download_shopping_cart)
        .service(list_recipes)
        .service(create_recipe)
        .service(get_recipe)
        .service(update_recipe)
        .service(delete_recipe)
        .service(add_favorite)
        .service(remove_favorite)
        .service(add_to_shopping_cart)
        .service(remove_from_shopping_cart);
}
