//! User, subscription and paging DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AnnotatedRecipe, Error, Page, PageRequest, Subscription, User, UserProfile};
use crate::inbound::http::recipes_dto::{RecipeMiniBody, RecipeView, RecipeViewKind, render_recipe};
use crate::inbound::http::validation::{FieldName, parse_page, parse_u32};

/// Public user representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Whether the viewer follows this user. Always `false` for anonymous viewers.
    pub is_subscribed: bool,
}

impl UserBody {
    pub(crate) fn new(user: &User, is_subscribed: bool) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_owned(),
            username: user.username().to_string(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            is_subscribed,
        }
    }
}

impl From<UserProfile> for UserBody {
    fn from(value: UserProfile) -> Self {
        Self::new(&value.user, value.is_subscribed)
    }
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionBody {
    #[serde(flatten)]
    pub user: UserBody,
    #[schema(value_type = Vec<RecipeMiniBody>)]
    pub recipes: Vec<RecipeView>,
    /// Total recipes by the author, independent of the preview size.
    pub recipes_count: u64,
}

impl From<Subscription> for SubscriptionBody {
    fn from(value: Subscription) -> Self {
        Self {
            user: UserBody::new(&value.author, true),
            recipes: value
                .recipes
                .into_iter()
                .map(|recipe| {
                    render_recipe(AnnotatedRecipe::unannotated(recipe), RecipeViewKind::Mini)
                })
                .collect(),
            recipes_count: value.recipes_count,
        }
    }
}

/// One page of users.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserPageBody {
    pub count: u64,
    pub results: Vec<UserBody>,
}

impl From<Page<UserProfile>> for UserPageBody {
    fn from(value: Page<UserProfile>) -> Self {
        Self {
            count: value.total,
            results: value.items.into_iter().map(UserBody::from).collect(),
        }
    }
}

/// One page of subscriptions.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionPageBody {
    pub count: u64,
    pub results: Vec<SubscriptionBody>,
}

impl From<Page<Subscription>> for SubscriptionPageBody {
    fn from(value: Page<Subscription>) -> Self {
        Self {
            count: value.total,
            results: value.items.into_iter().map(SubscriptionBody::from).collect(),
        }
    }
}

/// `limit`/`offset` query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page size, clamped to `1..=100`.
    pub limit: Option<String>,
    /// Number of items to skip.
    pub offset: Option<String>,
}

impl PageQuery {
    pub(crate) fn page(&self) -> Result<PageRequest, Error> {
        parse_page(self.limit.as_deref(), self.offset.as_deref())
    }
}

/// Query parameters for subscription endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SubscriptionQuery {
    /// Maximum number of recipes embedded per author.
    pub recipes_limit: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SubscriptionQuery {
    pub(crate) fn recipes_limit(&self) -> Result<Option<u32>, Error> {
        parse_u32(self.recipes_limit.as_deref(), FieldName::new("recipesLimit"))
    }

    pub(crate) fn page(&self) -> Result<PageRequest, Error> {
        parse_page(self.limit.as_deref(), self.offset.as_deref())
    }
}
