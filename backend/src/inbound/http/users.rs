//! User and subscription endpoints.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/me
//! GET    /api/v1/users/subscriptions?recipesLimit=3
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users/{id}/subscribe?recipesLimit=3
//! DELETE /api/v1/users/{id}/subscribe
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users_dto::{
    PageQuery, SubscriptionBody, SubscriptionPageBody, SubscriptionQuery, UserBody, UserPageBody,
};
use crate::inbound::http::validation::{FieldName, parse_user_id};

fn path_user_id(path: web::Path<String>) -> Result<UserId, Error> {
    parse_user_id(&path.into_inner(), FieldName::new("id"))
}

/// List users ordered by username.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users", body = UserPageBody),
        (status = 400, description = "Malformed paging", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<UserPageBody>> {
    let viewer = session.user_id()?;
    let page = query.page()?;
    let users = state.users.list_users(viewer, page).await?;
    Ok(web::Json(users.into()))
}

/// The signed-in user's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserBody),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserBody>> {
    let viewer = session.require_user_id()?;
    let profile = state.users.current_user(viewer).await?;
    Ok(web::Json(profile.into()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserBody>> {
    let user_id = path_user_id(path)?;
    let viewer = session.user_id()?;
    let profile = state.users.get_user(viewer, user_id).await?;
    Ok(web::Json(profile.into()))
}

/// Authors the signed-in user follows.
#[utoipa::path(
    get,
    path = "/api/v1/users/subscriptions",
    params(SubscriptionQuery),
    responses(
        (status = 200, description = "Followed authors", body = SubscriptionPageBody),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["users"],
    operation_id = "listSubscriptions"
)]
#[get("/users/subscriptions")]
pub async fn list_subscriptions(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SubscriptionQuery>,
) -> ApiResult<web::Json<SubscriptionPageBody>> {
    let follower = session.require_user_id()?;
    let page = query.page()?;
    let recipes_limit = query.recipes_limit()?;
    let subscriptions = state
        .subscriptions_query
        .list_subscriptions(follower, page, recipes_limit)
        .await?;
    Ok(web::Json(subscriptions.into()))
}

/// Follow an author.
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/subscribe",
    params(
        ("id" = String, Path, description = "Author identifier"),
        SubscriptionQuery
    ),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionBody),
        (status = 400, description = "Self or duplicate subscription", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown author", body = Error)
    ),
    tags = ["users"],
    operation_id = "subscribe"
)]
#[post("/users/{id}/subscribe")]
pub async fn subscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<SubscriptionQuery>,
) -> ApiResult<HttpResponse> {
    let follower = session.require_user_id()?;
    let author = path_user_id(path)?;
    let recipes_limit = query.recipes_limit()?;
    let subscription = state
        .subscriptions
        .subscribe(follower, author, recipes_limit)
        .await?;
    Ok(HttpResponse::Created().json(SubscriptionBody::from(subscription)))
}

/// Stop following an author.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/subscribe",
    params(("id" = String, Path, description = "Author identifier")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not subscribed", body = Error)
    ),
    tags = ["users"],
    operation_id = "unsubscribe"
)]
#[delete("/users/{id}/subscribe")]
pub async fn unsubscribe(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let follower = session.require_user_id()?;
    let author = path_user_id(path)?;
    state.subscriptions.unsubscribe(follower, author).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register user routes on a scope.
///
/// Literal segments (`me`, `subscriptions`) are registered ahead of
/// `/users/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(current_user)
        .service(list_subscriptions)
        .service(get_user)
        .service(subscribe)
        .service(unsubscribe);
}
