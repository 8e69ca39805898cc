//! Ingredient and tag read endpoints.
//!
//! ```text
//! GET /api/v1/ingredients?name=egg
//! GET /api/v1/ingredients/{id}
//! GET /api/v1/tags
//! GET /api/v1/tags/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Ingredient, Tag};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Ingredient as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "egg")]
    pub name: String,
    #[schema(example = "pcs")]
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientBody {
    fn from(value: Ingredient) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            measurement_unit: value.measurement_unit,
        }
    }
}

/// Tag as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "Breakfast")]
    pub name: String,
    #[schema(example = "#E26C2D")]
    pub color: String,
    #[schema(example = "breakfast")]
    pub slug: String,
}

impl From<Tag> for TagBody {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            color: value.color,
            slug: value.slug,
        }
    }
}

/// Query parameters for `GET /api/v1/ingredients`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientSearch {
    /// Case-insensitive name fragment.
    pub name: Option<String>,
}

/// List ingredients, optionally filtered by name.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    params(IngredientSearch),
    responses(
        (status = 200, description = "Ingredients ordered by name", body = [IngredientBody]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listIngredients",
    security([])
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
    query: web::Query<IngredientSearch>,
) -> ApiResult<web::Json<Vec<IngredientBody>>> {
    let ingredients = state
        .catalogue
        .list_ingredients(query.into_inner().name)
        .await?;
    Ok(web::Json(
        ingredients.into_iter().map(IngredientBody::from).collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    params(("id" = String, Path, description = "Ingredient identifier")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Unknown ingredient", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "getIngredient",
    security([])
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<IngredientBody>> {
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let ingredient = state.catalogue.get_ingredient(id).await?;
    Ok(web::Json(ingredient.into()))
}

/// List every tag.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "Tags ordered by name", body = [TagBody]),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listTags",
    security([])
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TagBody>>> {
    let tags = state.catalogue.list_tags().await?;
    Ok(web::Json(tags.into_iter().map(TagBody::from).collect()))
}

/// Fetch one tag.
#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(("id" = String, Path, description = "Tag identifier")),
    responses(
        (status = 200, description = "Tag", body = TagBody),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "Unknown tag", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "getTag",
    security([])
)]
#[get("/tags/{id}")]
pub async fn get_tag(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TagBody>> {
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let tag = state.catalogue.get_tag(id).await?;
    Ok(web::Json(tag.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureCatalogueQuery, MockCatalogueQuery};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use mockall::predicate::eq;
    use serde_json::Value;
    use std::sync::Arc;

    fn app_with(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_ingredients)
                .service(get_ingredient)
                .service(list_tags)
                .service(get_tag),
        )
    }

    fn fixture_state() -> HttpState {
        HttpState {
            catalogue: Arc::new(FixtureCatalogueQuery),
            ..HttpState::fixtures()
        }
    }

    #[actix_web::test]
    async fn ingredients_are_camel_cased() {
        let app = actix_test::init_service(app_with(fixture_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ingredients")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let first = &body.as_array().expect("array")[0];
        assert_eq!(first["measurementUnit"], "pcs");
        assert!(first.get("measurement_unit").is_none());
    }

    #[actix_web::test]
    async fn name_filter_is_forwarded() {
        let mut catalogue = MockCatalogueQuery::new();
        catalogue
            .expect_list_ingredients()
            .with(eq(Some("mil".to_owned())))
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        let state = HttpState {
            catalogue: Arc::new(catalogue),
            ..HttpState::fixtures()
        };

        let app = actix_test::init_service(app_with(state)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/ingredients?name=mil")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn malformed_tag_id_is_bad_request() {
        let app = actix_test::init_service(app_with(fixture_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/tags/not-a-uuid")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_uuid");
    }

    #[actix_web::test]
    async fn unknown_tag_is_not_found() {
        let app = actix_test::init_service(app_with(fixture_state())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/tags/00000000-0000-0000-0000-000000000000")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
