//! Recipe request and response DTOs.
//!
//! Every recipe body is produced by [`render_recipe`]; the caller picks the
//! [`RecipeViewKind`] and gets back the matching [`RecipeView`] variant.
//! Read responses carry the viewer-specific flags, write responses omit them
//! and the mini form is used by collection endpoints and subscription
//! previews.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    AnnotatedRecipe, Error, IngredientAmount, Page, Recipe, RecipeDraft, RecipeFilter,
    RecipeIngredient, Tag, UserId,
};
use crate::inbound::http::catalogue::TagBody;
use crate::inbound::http::users_dto::UserBody;
use crate::inbound::http::validation::{
    FieldName, parse_flag, parse_page, parse_slug_list, parse_user_id, parse_uuid,
};

/// Which recipe representation to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeViewKind {
    /// Read view including `isFavorited` and `isInShoppingCart`.
    Full,
    /// Response to a create or update.
    Write,
    /// Identifier, name, image and cooking time only.
    Mini,
}

/// Ingredient line within a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: u32,
}

impl From<RecipeIngredient> for RecipeIngredientBody {
    fn from(value: RecipeIngredient) -> Self {
        Self {
            id: value.ingredient.id.to_string(),
            name: value.ingredient.name,
            measurement_unit: value.ingredient.measurement_unit,
            amount: value.amount,
        }
    }
}

/// Recipe as read by a viewer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub tags: Vec<TagBody>,
    pub author: UserBody,
    pub ingredients: Vec<RecipeIngredientBody>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    #[schema(example = "Pancakes")]
    pub name: String,
    pub image: String,
    pub text: String,
    /// Minutes.
    #[schema(example = 20)]
    pub cooking_time: u32,
}

/// Recipe as returned from a create or update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeWriteBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub tags: Vec<TagBody>,
    pub author: UserBody,
    pub ingredients: Vec<RecipeIngredientBody>,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: u32,
}

/// Compact recipe representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMiniBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: u32,
}

/// A rendered recipe. Serialises as the wrapped body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeView {
    Full(RecipeBody),
    Write(RecipeWriteBody),
    Mini(RecipeMiniBody),
}

impl RecipeView {
    /// The representation this view was rendered as.
    pub fn kind(&self) -> RecipeViewKind {
        match self {
            Self::Full(_) => RecipeViewKind::Full,
            Self::Write(_) => RecipeViewKind::Write,
            Self::Mini(_) => RecipeViewKind::Mini,
        }
    }
}

/// Render a recipe in the requested representation.
pub fn render_recipe(annotated: AnnotatedRecipe, kind: RecipeViewKind) -> RecipeView {
    let AnnotatedRecipe {
        recipe,
        membership,
        author_subscribed,
    } = annotated;
    let Recipe {
        id,
        author,
        name,
        text,
        image,
        cooking_time,
        tags,
        ingredients,
        ..
    } = recipe;
    let id = id.to_string();

    match kind {
        RecipeViewKind::Full => RecipeView::Full(RecipeBody {
            id,
            tags: tag_bodies(tags),
            author: UserBody::new(&author, author_subscribed),
            ingredients: ingredient_bodies(ingredients),
            is_favorited: membership.is_favorited,
            is_in_shopping_cart: membership.is_in_shopping_cart,
            name,
            image,
            text,
            cooking_time,
        }),
        RecipeViewKind::Write => RecipeView::Write(RecipeWriteBody {
            id,
            tags: tag_bodies(tags),
            author: UserBody::new(&author, author_subscribed),
            ingredients: ingredient_bodies(ingredients),
            name,
            image,
            text,
            cooking_time,
        }),
        RecipeViewKind::Mini => RecipeView::Mini(RecipeMiniBody {
            id,
            name,
            image,
            cooking_time,
        }),
    }
}

fn tag_bodies(tags: Vec<Tag>) -> Vec<TagBody> {
    tags.into_iter().map(TagBody::from).collect()
}

fn ingredient_bodies(ingredients: Vec<RecipeIngredient>) -> Vec<RecipeIngredientBody> {
    ingredients
        .into_iter()
        .map(RecipeIngredientBody::from)
        .collect()
}

/// One page of recipes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecipePageBody {
    pub count: u64,
    #[schema(value_type = Vec<RecipeBody>)]
    pub results: Vec<RecipeView>,
}

impl From<Page<AnnotatedRecipe>> for RecipePageBody {
    fn from(value: Page<AnnotatedRecipe>) -> Self {
        Self {
            count: value.total,
            results: value
                .items
                .into_iter()
                .map(|recipe| render_recipe(recipe, RecipeViewKind::Full))
                .collect(),
        }
    }
}

/// Ingredient reference in a recipe write request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientAmountRequest {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(minimum = 1, maximum = 32000)]
    pub amount: i64,
}

/// Request payload for creating or replacing a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Tag identifiers.
    pub tags: Vec<String>,
    pub ingredients: Vec<IngredientAmountRequest>,
    #[schema(max_length = 200)]
    pub name: String,
    /// Image reference, for example a data URI or a stored file name.
    pub image: String,
    pub text: String,
    #[schema(minimum = 1)]
    pub cooking_time: i64,
}

// Negative numbers collapse to zero so the domain reports them as below the
// minimum alongside every other range violation.
fn saturate_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

impl RecipeRequest {
    /// Parse identifiers and build the unvalidated domain draft.
    pub(crate) fn into_draft(self) -> Result<RecipeDraft, Error> {
        let tag_ids = self
            .tags
            .iter()
            .map(|raw| parse_uuid(raw, FieldName::new("tags")))
            .collect::<Result<Vec<_>, _>>()?;
        let ingredients = self
            .ingredients
            .iter()
            .map(|item| {
                Ok(IngredientAmount {
                    ingredient_id: parse_uuid(&item.id, FieldName::new("ingredients"))?,
                    amount: saturate_u32(item.amount),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(RecipeDraft {
            name: self.name,
            text: self.text,
            image: self.image,
            cooking_time: saturate_u32(self.cooking_time),
            tag_ids,
            ingredients,
        })
    }
}

/// Query parameters for `GET /api/v1/recipes`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Comma separated tag slugs; a recipe matches when it has any of them.
    pub tags: Option<String>,
    /// Author user id.
    pub author: Option<String>,
    /// `1` restricts to the viewer's favourites.
    pub is_favorited: Option<String>,
    /// `1` restricts to the viewer's shopping cart.
    pub is_in_shopping_cart: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl RecipeListQuery {
    /// Build the domain filter. Viewer flags are ignored for anonymous callers.
    pub(crate) fn into_filter(self, viewer: Option<&UserId>) -> Result<RecipeFilter, Error> {
        let tag_slugs = parse_slug_list(self.tags.as_deref(), FieldName::new("tags"))?;
        let author = self
            .author
            .as_deref()
            .map(|raw| parse_user_id(raw, FieldName::new("author")))
            .transpose()?;
        let favorited = parse_flag(self.is_favorited.as_deref(), FieldName::new("isFavorited"))?;
        let in_cart = parse_flag(
            self.is_in_shopping_cart.as_deref(),
            FieldName::new("isInShoppingCart"),
        )?;
        let page = parse_page(self.limit.as_deref(), self.offset.as_deref())?;

        Ok(RecipeFilter {
            tag_slugs,
            author,
            favorited_by: viewer.filter(|_| favorited).cloned(),
            in_cart_of: viewer.filter(|_| in_cart).cloned(),
            page,
        })
    }
}
